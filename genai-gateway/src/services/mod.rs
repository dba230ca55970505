pub mod encoder;
pub mod invocation;
pub mod providers;
pub mod staging;

pub use encoder::encode_upload;
pub use invocation::invoke;
pub use staging::{StagedUpload, UploadForm, UploadStager};
