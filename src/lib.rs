pub mod config;
pub mod core;
pub mod general;
pub mod network;
pub mod packet;

pub mod defaults;

pub type NetResult<T> = Result<T, error::NetError>;

pub mod error {
    use std::fmt::Display;

    #[derive(Debug)]
    pub struct NetError(pub String);

    impl Display for NetError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }
}
