// Document collaborators: text extraction from uploads, multipart form handling,
// and the local store for the most recent job description / CV text.

pub mod extract;
pub mod handlers;
pub mod store;
pub mod upload;
