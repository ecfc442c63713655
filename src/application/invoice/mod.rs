//! Invoice use cases

mod change_invoice_status;
mod create_invoice;
mod delete_invoice;
mod get_invoice_details;
mod list_invoices;
mod list_themes;
mod prepare_invoice_draft;
mod update_invoice;

pub use change_invoice_status::ChangeInvoiceStatusUseCase;
pub use create_invoice::CreateInvoiceUseCase;
pub use delete_invoice::DeleteInvoiceUseCase;
pub use get_invoice_details::GetInvoiceDetailsUseCase;
pub use list_invoices::ListInvoicesUseCase;
pub use list_themes::ListThemesUseCase;
pub use prepare_invoice_draft::{
  PrepareInvoiceDraftResponse, PrepareInvoiceDraftUseCase, WizardStepInfo,
};
pub use update_invoice::UpdateInvoiceUseCase;
