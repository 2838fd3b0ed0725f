pub mod authorization;
pub mod grpc;
pub mod http;
