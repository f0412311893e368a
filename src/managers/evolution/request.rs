use super::operation::{MediaMessage, Operation};
use crate::constants::endpoints;
use crate::constants::media::DEFAULT_DOCUMENT_FILENAME;
use crate::services::transport::HttpMethod;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundCall {
    pub method: HttpMethod,
    pub path: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Map<String, Value>>,
}

impl OutboundCall {
    fn post(path: &'static str, body: Map<String, Value>) -> Self {
        Self {
            method: HttpMethod::Post,
            path,
            body: Some(body),
        }
    }

    fn get(path: &'static str) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            body: None,
        }
    }
}

fn body_with_number(number: &str) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("number".to_string(), Value::String(number.to_string()));
    body
}

fn insert_caption(body: &mut Map<String, Value>, caption: Option<&String>) {
    if let Some(caption) = caption.filter(|c| !c.is_empty()) {
        body.insert("caption".to_string(), Value::String(caption.clone()));
    }
}

fn media_call(number: &str, media: &MediaMessage) -> OutboundCall {
    let mut body = body_with_number(number);
    match media {
        MediaMessage::Image { url, caption } => {
            body.insert("mediatype".to_string(), Value::String("image".to_string()));
            body.insert("media".to_string(), Value::String(url.clone()));
            insert_caption(&mut body, caption.as_ref());
            OutboundCall::post(endpoints::SEND_MEDIA, body)
        }
        MediaMessage::Document {
            url,
            filename,
            caption,
        } => {
            let filename = filename
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_DOCUMENT_FILENAME);
            body.insert(
                "mediatype".to_string(),
                Value::String("document".to_string()),
            );
            body.insert("media".to_string(), Value::String(url.clone()));
            body.insert("filename".to_string(), Value::String(filename.to_string()));
            insert_caption(&mut body, caption.as_ref());
            OutboundCall::post(endpoints::SEND_MEDIA, body)
        }
        MediaMessage::Audio { url } => {
            body.insert("audio".to_string(), Value::String(url.clone()));
            OutboundCall::post(endpoints::SEND_AUDIO, body)
        }
    }
}

/// Maps an operation to exactly one gateway call. Pure: no clock, no I/O.
pub fn build_call(operation: &Operation) -> OutboundCall {
    match operation {
        Operation::SendText { number, text } => {
            let mut body = body_with_number(number);
            body.insert("text".to_string(), Value::String(text.clone()));
            OutboundCall::post(endpoints::SEND_TEXT, body)
        }
        Operation::SendMedia { number, media } => media_call(number, media),
        Operation::CheckConnection => OutboundCall::get(endpoints::CONNECTION_STATE),
        Operation::GetProfile { number } => {
            OutboundCall::post(endpoints::WHATSAPP_PROFILE, body_with_number(number))
        }
    }
}
