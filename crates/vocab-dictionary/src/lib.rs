pub mod markup;
pub mod parser;
pub mod service;
pub mod urls;

pub use markup::{MarkupProfile, RegionMarkup};
pub use parser::EntryParser;
pub use service::DictionaryService;
pub use urls::DictionaryUrls;

#[cfg(test)]
mod tests;
