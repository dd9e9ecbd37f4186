pub mod collect;
pub mod history;
pub mod init;
pub mod species;
pub mod status;
pub mod version;

/// Single-threaded runtime; all request concurrency is cooperative
pub(crate) fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}
