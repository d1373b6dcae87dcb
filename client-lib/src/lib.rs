pub mod api_methods;
pub mod extractor;
pub mod scheduler;
