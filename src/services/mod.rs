pub mod artifact_writer;
pub mod image_codec;
pub mod locale_resolver;
pub mod mock_response;
pub mod section_parser;
pub mod solve_client;

pub use artifact_writer::ArtifactWriter;
pub use locale_resolver::LocaleResolver;
pub use section_parser::split_response;
pub use solve_client::SolveClient;
