pub mod error;
pub mod loading;
pub mod modal;
pub mod toast;

pub use error::ErrorView;
pub use loading::LoadingView;
pub use modal::ModalShell;
pub use toast::{provide_toaster, use_toaster, Toast, ToastHost, Toaster};
