use chrono::{Datelike, NaiveDate};
use gridzone_calendar::{DEFAULT_WATER_YEAR_START, Season, season_start, water_year};

#[test]
fn all_months_october_start() {
    for month in 1..=9_u8 {
        assert_eq!(
            water_year(2016, month, DEFAULT_WATER_YEAR_START).unwrap(),
            2016,
            "month {month} with October start should return 2016"
        );
    }
    for month in 10..=12_u8 {
        assert_eq!(
            water_year(2016, month, DEFAULT_WATER_YEAR_START).unwrap(),
            2017,
            "month {month} with October start should return 2017"
        );
    }
}

#[test]
fn quarter_water_years_follow_start_month() {
    // A DJF quarter starting in December 2015 belongs to water year 2016,
    // as do the following MAM, JJA and SON quarters up to September 2016.
    let days = [
        NaiveDate::from_ymd_opt(2016, 1, 15).unwrap(),
        NaiveDate::from_ymd_opt(2016, 4, 15).unwrap(),
        NaiveDate::from_ymd_opt(2016, 7, 15).unwrap(),
        NaiveDate::from_ymd_opt(2016, 10, 15).unwrap(),
    ];
    let mut labels = Vec::new();
    for day in days {
        let start = season_start(day);
        let month = start.month() as u8;
        let season = Season::from_start_month(month).unwrap();
        let wy = water_year(start.year(), month, DEFAULT_WATER_YEAR_START).unwrap();
        labels.push((season, wy));
    }
    assert_eq!(
        labels,
        vec![
            (Season::Djf, 2016),
            (Season::Mam, 2016),
            (Season::Jja, 2016),
            (Season::Son, 2016),
        ]
    );
}

#[test]
fn negative_years() {
    assert_eq!(water_year(-100, 10, 10).unwrap(), -99);
    assert_eq!(water_year(-1, 1, 10).unwrap(), -1);
}
