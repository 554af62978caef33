mod init;
mod parameters;
mod storage;

pub use parameters::NetworkParameters;
