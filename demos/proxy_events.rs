//! Proxy event logging example
//!
//! Demonstrates HTTP and DNS enrichment, error chains and fatal escalation
//! enforced at the entry point.
//!
//! Run with: cargo run --example proxy_events

use http::{Method, Request, Response, StatusCode};
use proxy_log::prelude::*;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug)]
struct UpstreamError {
    upstream: &'static str,
    source: std::io::Error,
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upstream {} unavailable", self.upstream)
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

fn main() {
    println!("=== Proxy Log - Proxy Events Example ===\n");

    let handler = Handler::builder()
        .level(Level::Debug)
        .writer(ConsoleWriter::with_colors(false).with_output_format(OutputFormat::Logfmt))
        .build();

    println!("1. HTTP request lifecycle:");
    let remote: SocketAddr = "192.0.2.44:51822".parse().expect("valid address");
    let mut request = Request::builder()
        .method(Method::GET)
        .uri("http://example.com/search?q=proxy")
        .header("user-agent", "curl/8.5.0")
        .header("referer", "http://example.com/")
        .body(())
        .expect("valid request");
    request.extensions_mut().insert(remote);

    handler.with_request(&request).debug("request received").enforce();

    let response = Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "text/html; charset=utf-8")
        .header("content-length", "5120")
        .body(())
        .expect("valid response");
    handler
        .with_request(&request)
        .with_response(&response)
        .with_field("elapsed", Duration::from_millis(38))
        .info("request proxied")
        .enforce();

    println!("\n2. DNS resolution:");
    let questions = vec![
        DnsQuestion::new("example.com.", RecordType::A),
        DnsQuestion::new("example.com.", RecordType::Aaaa),
    ];
    handler
        .with_dns_questions(&questions)
        .debug("query received")
        .enforce();

    let answer = DnsRecord::A("93.184.216.34".parse().expect("valid address"));
    handler
        .with_dns_questions(&questions[..1])
        .with_dns_answer("example.com.", Duration::from_secs(300), &answer)
        .info("answer cached")
        .enforce();

    handler
        .with_dns_questions(&[DnsQuestion::new("missing.example.", RecordType::A)])
        .with_dns_nxdomain()
        .info("name does not exist")
        .enforce();

    println!("\n3. Error chains:");
    let err = UpstreamError {
        upstream: "9.9.9.9:53",
        source: std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out"),
    };
    handler
        .with_field("attempt", 3)
        .with_error(&err)
        .send()
        .enforce();

    println!("\n4. Fatal escalation (the process exits with code 3):");
    handler
        .with_error(&err)
        .with_exit_code(3)
        .fatal("every upstream is unreachable")
        .enforce();

    unreachable!("enforce exits on a fatal outcome");
}
