use assert_approx_eq::assert_approx_eq;
use chrono::NaiveDate;
use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

use battery_cost_projection::{
    analysis::{find_break_even, yearly_snapshots, Analyzer, ProjectionSummary},
    io,
    models::{
        DisplayWindow, LeadAcidParameters, LithiumParameters, MonthInterval, ProjectionConfig,
        ProjectionInputs, ProjectionParameters, Technology,
    },
    projection::{build_monthly_ledger, project, to_cumulative_series, ProjectionEngine},
};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn default_analyzer() -> Analyzer {
    Analyzer::new(ProjectionInputs::default(), ProjectionConfig::default(), start()).unwrap()
}

fn lead_acid(price: f64, lifespan_months: u32, salvage: f64) -> LeadAcidParameters {
    LeadAcidParameters {
        purchase_price: price,
        lifespan_months,
        maintenance_interval: MonthInterval::from_months(12),
        maintenance_cost: 2000.0 / 28.0,
        salvage_value: salvage,
        monthly_electricity_cost: 4.53 * 80.0 / 28.0,
    }
}

// --- Default scenario ---

#[test]
fn test_default_conversions() {
    let analyzer = default_analyzer();
    let projection = analyzer.projection();
    let la = &projection.lead_acid_ledger.entries[0];
    let li = &projection.lithium_ledger.entries[0];

    assert_approx_eq!(la.maintenance, 71.428571, 1e-6);
    assert_approx_eq!(la.electricity, 12.942857, 1e-6);
    assert_approx_eq!(li.electricity, 9.06, 1e-9);
    assert_approx_eq!(la.total(), 1400.0 + 71.428571 + 12.942857, 1e-5);
    assert_approx_eq!(li.total(), 1609.06, 1e-9);
}

#[test]
fn test_default_horizon_and_alignment() {
    let projection = default_analyzer().projection().clone();
    assert_eq!(projection.horizon_months, 361);
    assert_eq!(projection.lead_acid_ledger.len(), 361);
    assert_eq!(projection.lithium_ledger.len(), 361);
    assert_eq!(projection.lead_acid.len(), 361);
    assert_eq!(projection.lithium.len(), 361);
    assert_eq!(
        projection.lead_acid.points[360].date,
        NaiveDate::from_ymd_opt(2054, 1, 1).unwrap()
    );
}

#[test]
fn test_default_event_months() {
    let projection = default_analyzer().projection().clone();
    let la = &projection.lead_acid_ledger;
    assert_eq!(la.purchase_months(), (0..=360).step_by(48).collect::<Vec<u32>>());
    assert_eq!(la.salvage_months(), (48..=360).step_by(48).collect::<Vec<u32>>());
    assert_eq!(la.maintenance_months().len(), 31);
    assert_eq!(
        projection.lithium_ledger.purchase_months(),
        (0..=360).step_by(96).collect::<Vec<u32>>()
    );
    assert!(projection.lithium_ledger.maintenance_months().is_empty());
}

#[test]
fn test_salvage_dip_at_replacement() {
    let projection = default_analyzer().projection().clone();
    let before = projection.lead_acid.points[47].total;
    let at = projection.lead_acid.points[48].total;
    assert_approx_eq!(at - before, 1400.0 - 150.0 + 71.428571 + 12.942857, 1e-5);
}

#[test]
fn test_summary_over_windows() {
    let analyzer = default_analyzer();
    let projection = analyzer.projection();
    for years in [5, 10, 20, 30] {
        let window = DisplayWindow::new(years).unwrap();
        let summary = ProjectionSummary::from_projection(projection, &window);
        let months = (years * 12) as usize;
        assert_eq!(summary.lead_acid_total, projection.lead_acid.points[months - 1].total);
        assert_eq!(summary.lithium_total, projection.lithium.points[months - 1].total);
        assert_eq!(summary.cheaper, Some(Technology::Lithium));
    }
}

#[test]
fn test_break_even_matches_series() {
    let projection = default_analyzer().projection().clone();
    let be = find_break_even(&projection.lead_acid.points, &projection.lithium.points).unwrap();
    assert_eq!(be.month, 14);
    let m = be.month as usize;
    assert!(projection.lithium.points[m - 1].total > projection.lead_acid.points[m - 1].total);
    assert!(projection.lithium.points[m].total <= projection.lead_acid.points[m].total);
}

#[test]
fn test_yearly_snapshots_full_window() {
    let analyzer = default_analyzer();
    let snaps = yearly_snapshots(analyzer.projection(), &DisplayWindow::new(30).unwrap());
    assert_eq!(snaps.len(), 30);
    assert_eq!(snaps[29].date, NaiveDate::from_ymd_opt(2053, 1, 1).unwrap());
}

#[test]
fn test_leap_day_start() {
    let start = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let projection = ProjectionEngine::default()
        .run(&ProjectionInputs::default(), start)
        .unwrap();
    assert_eq!(
        projection.lead_acid.points[12].date,
        NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
    );
    assert_eq!(
        projection.lead_acid.points[48].date,
        NaiveDate::from_ymd_opt(2028, 2, 29).unwrap()
    );
}

#[test]
fn test_fractional_maintenance_interval() {
    let mut inputs = ProjectionInputs::default();
    inputs.lead_acid.maintenance_interval_years = 0.1;
    let projection = ProjectionEngine::default().run(&inputs, start()).unwrap();
    let months = projection.lead_acid_ledger.maintenance_months();
    assert_eq!(&months[..4], &[0, 6, 12, 18]);
    assert_eq!(months.len(), 61);
}

#[test]
fn test_validation_rejects_bad_inputs() {
    let mut inputs = ProjectionInputs::default();
    inputs.lithium.efficiency_factor = 0.5;
    let err = ProjectionEngine::default().run(&inputs, start()).unwrap_err();
    assert!(err.to_string().contains("lithium.efficiency_factor"));
}

// --- Exporters ---

#[test]
fn test_csv_roundtrip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let analyzer = default_analyzer();
    let window = DisplayWindow::default();

    io::write_csv(analyzer.projection(), &window, &path).unwrap();
    let rows = io::read_csv(&path).unwrap();

    assert_eq!(rows.len(), 120);
    assert_eq!(rows[48].lead_acid_salvage, -150.0);
    assert_approx_eq!(
        rows[119].lithium_cumulative,
        analyzer.projection().lithium.points[119].total,
        1e-9
    );
}

#[test]
fn test_writer_for_each_format() {
    let dir = tempfile::TempDir::new().unwrap();
    let analyzer = default_analyzer();
    let window = DisplayWindow::new(5).unwrap();

    for name in ["out.csv", "out.json", "out.xlsx"] {
        let path = dir.path().join(name);
        let writer = io::writer_for(&path, false).unwrap();
        writer.write(analyzer.projection(), &window, &path).unwrap();
        assert!(path.exists(), "{name} was not written");
    }
}

#[test]
fn test_inputs_file_roundtrip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("inputs.json");
    let mut inputs = ProjectionInputs::default();
    inputs.lead_acid.lifespan_years = 5;
    inputs.display_years = 25;
    std::fs::write(&path, serde_json::to_string(&inputs).unwrap()).unwrap();

    let loaded = io::read_inputs(&path).unwrap();
    assert_eq!(loaded, inputs);
}

// --- Properties ---

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_purchase_count_is_ceil_of_horizon_over_lifespan(
        lifespan in 1u32..=240,
        horizon in 1u32..=361,
    ) {
        let params: ProjectionParameters = lead_acid(1400.0, lifespan, 150.0).into();
        let ledger = build_monthly_ledger(&params, horizon, start());
        let expected = horizon.div_ceil(lifespan) as usize;
        prop_assert_eq!(ledger.purchase_months().len(), expected);
        prop_assert_eq!(ledger.entries[0].salvage, 0.0);
        prop_assert_eq!(ledger.salvage_months().len(), expected - 1);
    }

    #[test]
    fn prop_maintenance_independent_of_lifespan(
        lifespan_a in 1u32..=240,
        lifespan_b in 1u32..=240,
        tenths in 1u32..=100,
    ) {
        let interval = MonthInterval::from_years(tenths as f64 / 10.0).unwrap();
        let mut a = lead_acid(1400.0, lifespan_a, 150.0);
        let mut b = lead_acid(1400.0, lifespan_b, 150.0);
        a.maintenance_interval = interval;
        b.maintenance_interval = interval;
        let la = build_monthly_ledger(&a.into(), 361, start());
        let lb = build_monthly_ledger(&b.into(), 361, start());
        prop_assert_eq!(la.maintenance_months(), lb.maintenance_months());
    }

    #[test]
    fn prop_lithium_series_non_decreasing(
        price in 1.0f64..5000.0,
        lifespan in 1u32..=240,
        electricity in 0.01f64..100.0,
    ) {
        let li = LithiumParameters {
            purchase_price: price,
            lifespan_months: lifespan,
            monthly_electricity_cost: electricity,
        };
        let projection = project(&lead_acid(1400.0, 48, 150.0), &li, 361, start());
        prop_assert!(projection
            .lithium
            .points
            .windows(2)
            .all(|w| w[1].total >= w[0].total));
    }

    #[test]
    fn prop_series_matches_ledger(
        lifespan in 1u32..=240,
        salvage in 0.0f64..2000.0,
    ) {
        let ledger = build_monthly_ledger(&lead_acid(1400.0, lifespan, salvage).into(), 361, start());
        let series = to_cumulative_series(&ledger);
        prop_assert_eq!(series.len(), ledger.len());
        let mut running = 0.0;
        for (entry, point) in ledger.entries.iter().zip(&series.points) {
            running += entry.total();
            prop_assert_eq!(point.date, entry.date);
            prop_assert!((point.total - running).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_window_is_prefix(years in 5u32..=30) {
        let projection = project(
            &lead_acid(1400.0, 48, 150.0),
            &LithiumParameters {
                purchase_price: 1600.0,
                lifespan_months: 96,
                monthly_electricity_cost: 9.06,
            },
            361,
            start(),
        );
        let window = DisplayWindow::new(years).unwrap();
        let shown = projection.lead_acid.within(&window);
        prop_assert_eq!(shown.len(), (years * 12) as usize);
        prop_assert_eq!(shown, &projection.lead_acid.points[..shown.len()]);
    }
}
