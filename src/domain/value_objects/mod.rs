mod price;
mod title;

pub use price::Price;
pub use title::Title;
