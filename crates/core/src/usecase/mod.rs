pub mod bridge;
pub mod responder;
