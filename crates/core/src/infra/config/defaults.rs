use crate::domain::model::HttpMethod;

pub(crate) fn default_timezone() -> String {
    "UTC".to_string()
}

pub(crate) fn default_http_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_http_port() -> u16 {
    3000
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_user_agent() -> String {
    format!("roundvote/{}", env!("CARGO_PKG_VERSION"))
}

pub(crate) fn default_prepare_offset() -> u32 {
    25
}

pub(crate) fn default_finalize_offset() -> u32 {
    30
}

pub(crate) fn default_tick_millis() -> u64 {
    800
}

pub(crate) fn default_method() -> HttpMethod {
    HttpMethod::Get
}

pub(crate) fn default_source_timeout_ms() -> u64 {
    5_000
}
