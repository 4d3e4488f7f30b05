pub mod cipher;
pub mod nmea;
pub mod record;
pub mod stream;

pub use cipher::*;
pub use nmea::*;
pub use record::*;
pub use stream::*;
