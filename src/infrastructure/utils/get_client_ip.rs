use actix_web::HttpRequest;

fn forwarded_header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Origin key used for rate limiting.
/// `trust_forwarded_headers`: whether a proxy in front of us sets
/// `X-Forwarded-For` / `X-Real-IP`. Falls back to the socket peer, then to
/// `"unknown"`.
pub fn get_client_ip(req: &HttpRequest, trust_forwarded_headers: bool) -> String {
    if trust_forwarded_headers {
        if let Some(ip) = forwarded_header(req, "x-forwarded-for")
            .or_else(|| forwarded_header(req, "x-real-ip"))
        {
            return ip;
        }
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
