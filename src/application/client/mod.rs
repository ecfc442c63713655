//! Client registry use cases

mod archive_client;
mod create_client;
mod delete_client;
mod list_clients;
mod update_client;

pub use archive_client::ArchiveClientUseCase;
pub use create_client::CreateClientUseCase;
pub use delete_client::DeleteClientUseCase;
pub use list_clients::ListClientsUseCase;
pub use update_client::UpdateClientUseCase;
