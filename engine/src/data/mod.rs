// Data acquisition: provider seam, HTTP provider and offline CSV exports
pub mod csv_parser;
pub mod market_data;
pub mod yahoo;

pub use csv_parser::CsvProvider;
pub use market_data::{InMemoryProvider, MarketDataProvider};
pub use yahoo::YahooProvider;
