//! # gridzone-calendar
//!
//! Calendar helpers used to bin daily grids into periods and to label the
//! resulting slices.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDate"] -->|"month_start()"| B["month period"]
//!     A -->|"season_start()"| C["QS-DEC quarter"]
//!     A -->|"year_start()"| D["year period"]
//!     C -->|"Season::from_start_month()"| E["DJF / MAM / JJA / SON"]
//!     B -->|"water_year()"| F["water year"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use gridzone_calendar::{Season, season_start, water_year};
//!
//! let day = NaiveDate::from_ymd_opt(2016, 1, 20).unwrap();
//! let quarter = season_start(day);
//! assert_eq!(quarter, NaiveDate::from_ymd_opt(2015, 12, 1).unwrap());
//! assert_eq!(Season::from_month(1).unwrap(), Season::Djf);
//!
//! // October starts the next water year.
//! assert_eq!(water_year(2015, 12, 10).unwrap(), 2016);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `water_year` | Water year computation |
//! | `season` | Meteorological seasons |
//! | `period` | Period anchors and label dates |
//! | `error` | Error types |

mod error;
mod period;
mod season;
mod water_year;

pub use error::CalendarError;
pub use period::{mid_month, month_first, month_start, season_start, year_start};
pub use season::Season;
pub use water_year::{DEFAULT_WATER_YEAR_START, water_year};
