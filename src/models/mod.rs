pub mod entities;
pub mod requests;
pub mod responses;

#[derive(Clone)]
pub struct AccessLogMeta {
    pub error: Option<String>,
    pub request_body: Option<String>,
}
