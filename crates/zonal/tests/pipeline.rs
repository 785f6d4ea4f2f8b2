//! Integration tests: resample a daily stack, then aggregate by zone.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use gridzone_calendar::Season;
use gridzone_resample::{SummaryType, summarize};
use gridzone_zonal::{
    LabelColumn, ZonalConfig, ZonalTable, ZoneRaster, calculate_zonal_statistics,
};
use ndarray::{Array3, array};

/// 2x3 zone raster: zone 1 on the left, zone 12 on the right, one unzoned cell.
fn zones() -> ZoneRaster {
    ZoneRaster::new(array![[1, 1, 12], [1, -9999, 12]], Some(-9999))
}

/// Daily record 2016-01-01..=2017-12-31. Zone 1 cells receive 1.0 per day,
/// zone 12 cells 2.0 per day, the unzoned cell 100.0.
fn stack() -> (Vec<NaiveDate>, Array3<f64>) {
    let first = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(2017, 12, 31).unwrap();
    let dates: Vec<NaiveDate> = first.iter_days().take_while(|d| *d <= last).collect();
    let per_day = array![[1.0, 1.0, 2.0], [1.0, 100.0, 2.0]];
    let values = Array3::from_shape_fn((dates.len(), 2, 3), |(_, y, x)| per_day[[y, x]]);
    (dates, values)
}

fn table_for(summary: SummaryType, config: &ZonalConfig) -> ZonalTable {
    let (dates, values) = stack();
    let grid = summarize(&dates, values.view(), summary).unwrap();
    calculate_zonal_statistics(&grid, &zones(), config).unwrap()
}

#[test]
fn monthly_rows_and_labels() {
    let table = table_for(SummaryType::MonthlySum, &ZonalConfig::new());
    // 24 months x 2 zones.
    assert_eq!(table.len(), 48);
    assert_eq!(
        table.label_columns(),
        &[
            LabelColumn::Month,
            LabelColumn::Year,
            LabelColumn::Date,
            LabelColumn::WaterYear
        ]
    );

    let first = &table.records()[0];
    assert_eq!(first.zone, "001");
    assert_eq!(first.stats.count, 3);
    assert_relative_eq!(first.stats.mean, 31.0);
    assert_relative_eq!(first.stats.sum, 93.0);
    assert_eq!(first.labels.month, Some(1));
    assert_eq!(first.labels.year, Some(2016));
    assert_eq!(
        first.labels.date,
        Some(NaiveDate::from_ymd_opt(2016, 1, 15).unwrap())
    );

    let second = &table.records()[1];
    assert_eq!(second.zone, "012");
    assert_relative_eq!(second.stats.mean, 62.0);

    // October 2016 rolls into water year 2017.
    let october = &table.records()[2 * 9];
    assert_eq!(october.labels.month, Some(10));
    assert_eq!(october.labels.water_year, Some(2017));
}

#[test]
fn quarterly_sum_like_observation_workflow() {
    let config = ZonalConfig::new().with_zone_width(Some(2));
    let table = table_for(SummaryType::SeasonalSum, &config);
    // Quarters: Dec15, Mar16, Jun16, Sep16, Dec16, Mar17, Jun17, Sep17, Dec17.
    assert_eq!(table.len(), 9 * 2);

    let seasons: Vec<Season> = table
        .records()
        .iter()
        .step_by(2)
        .filter_map(|r| r.labels.season)
        .collect();
    assert_eq!(seasons[0], Season::Djf);
    assert_eq!(seasons[1], Season::Mam);
    assert_eq!(seasons[3], Season::Son);
    assert_eq!(seasons.len(), 9);

    let djf = &table.records()[0];
    assert_eq!(djf.zone, "01");
    assert_eq!(djf.labels.year, Some(2015));
    assert_eq!(djf.labels.water_year, Some(2016));
    assert_relative_eq!(djf.stats.mean, 60.0);

    assert!(table.records().iter().all(|r| r.zone == "01" || r.zone == "12"));
}

#[test]
fn mean_monthly_has_twelve_months() {
    let table = table_for(SummaryType::MeanMonthlyMean, &ZonalConfig::new());
    assert_eq!(table.len(), 24);
    let months: Vec<u8> = table
        .records()
        .iter()
        .step_by(2)
        .filter_map(|r| r.labels.month)
        .collect();
    assert_eq!(months, (1..=12).collect::<Vec<u8>>());
    for record in table.records() {
        assert_eq!(record.labels.year, None);
        assert_eq!(record.labels.date, None);
    }
}

#[test]
fn annual_mean_labels() {
    let table = table_for(SummaryType::AnnualMean, &ZonalConfig::new());
    assert_eq!(table.len(), 4);
    let r = &table.records()[3];
    assert_eq!(r.zone, "012");
    assert_eq!(r.labels.year, Some(2017));
    assert_eq!(r.labels.month, Some(6));
    assert_eq!(r.labels.water_year, Some(2017));
    assert_relative_eq!(r.stats.mean, 2.0);
}

#[test]
fn mean_annual_sum_single_slice() {
    let table = table_for(SummaryType::MeanAnnualSum, &ZonalConfig::new().with_zone_width(None));
    assert_eq!(table.len(), 2);
    assert_eq!(table.records()[0].zone, "1");
    assert_eq!(table.records()[1].zone, "12");
    assert_relative_eq!(table.records()[0].stats.mean, (366.0 + 365.0) / 2.0);
    assert!(table.label_columns().is_empty());
}

#[test]
fn zone_raster_off_grid_is_error() {
    let (dates, values) = stack();
    let grid = summarize(&dates, values.view(), SummaryType::AnnualSum).unwrap();
    let wrong = ZoneRaster::new(array![[1, 2]], None);
    assert!(calculate_zonal_statistics(&grid, &wrong, &ZonalConfig::new()).is_err());
}
