pub mod currency;
pub mod airports;
pub mod airlines;

pub use currency::{format_price, CurrencyTable};
pub use airports::{city_name, popular_airports};
pub use airlines::redirect_url;
