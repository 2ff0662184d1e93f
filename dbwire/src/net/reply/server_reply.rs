use bytes::Bytes;

use crate::net::connect::correlation_id::CorrelationId;

/// A reply frame after the transport decoded its header.
///
/// `response_to` carries the id of the request this frame answers; the body stays opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerReply {
    request_id: i32,
    response_to: CorrelationId,
    op_code: i32,
    payload: Bytes,
}

impl ServerReply {
    pub fn new(request_id: i32, response_to: CorrelationId, op_code: i32, payload: Bytes) -> Self {
        return ServerReply {
            request_id,
            response_to,
            op_code,
            payload,
        };
    }

    pub fn request_id(&self) -> i32 {
        return self.request_id;
    }

    pub fn response_to(&self) -> CorrelationId {
        return self.response_to;
    }

    pub fn op_code(&self) -> i32 {
        return self.op_code;
    }

    pub fn payload(&self) -> &Bytes {
        return &self.payload;
    }

    pub fn into_payload(self) -> Bytes {
        return self.payload;
    }
}
