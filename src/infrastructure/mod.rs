//! 基础设施层
//!
//! 持有网络客户端等资源，只暴露能力，不认识作业图片和流程

pub mod chat_transport;
pub mod geo_lookup;

#[cfg(test)]
pub(crate) mod test_server;

pub use chat_transport::{extract_message_content, ChatTransport, HttpChatTransport};
pub use geo_lookup::{GeoLookup, HttpGeoLookup};
