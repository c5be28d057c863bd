//! Reserved field keys written by the enrichment helpers

/// Human-readable summary set by the level-named terminals
pub const MESSAGE: &str = "msg";

pub const ERROR: &str = "error";
pub const ERROR_CHAIN: &str = "error_chain";
/// Name of the writer that failed, on the synthetic fatal message
pub const WRITER: &str = "writer";

pub const HTTP_METHOD: &str = "http_method";
pub const HTTP_URL: &str = "http_url";
pub const HTTP_PATH: &str = "http_path";
pub const HTTP_QUERY: &str = "http_query";
pub const HTTP_HOST: &str = "http_host";
pub const HTTP_PROTO: &str = "http_proto";
pub const HTTP_REMOTE_ADDR: &str = "http_remote_addr";
pub const HTTP_USER_AGENT: &str = "http_user_agent";
pub const HTTP_REFERER: &str = "http_referer";
pub const HTTP_REQUEST_LENGTH: &str = "http_request_length";
pub const HTTP_STATUS: &str = "http_status";
pub const HTTP_STATUS_CODE: &str = "http_status_code";
pub const HTTP_CONTENT_TYPE: &str = "http_content_type";
pub const HTTP_RESPONSE_LENGTH: &str = "http_response_length";

pub const DNS_QUESTION_COUNT: &str = "dns_question_count";
pub const DNS_QUESTIONS: &str = "dns_questions";
pub const DNS_QUESTION_NAME: &str = "dns_question_name";
pub const DNS_QUESTION_TYPE: &str = "dns_question_type";
pub const DNS_ANSWER_NAME: &str = "dns_answer_name";
pub const DNS_ANSWER_TTL: &str = "dns_answer_ttl";
pub const DNS_ANSWER_TYPE: &str = "dns_answer_type";
pub const DNS_ANSWER_DATA: &str = "dns_answer_data";
pub const DNS_RCODE: &str = "dns_rcode";
