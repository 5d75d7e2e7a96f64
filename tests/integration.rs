//! Integration tests for ParkirLens

use parkirlens::{
    city_potential, load_parking_sites, neighborhood_potentials, segment_sites, site_potentials,
    Category, MacroParams,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// Create a site table CSV with the required headers and the given rows.
fn create_sites_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Jenis,Kecamatan,Kelurahan,Lokasi,RATA-RATA YANG PARKIR"
    )
    .unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}

fn segmentation_fixture() -> NamedTempFile {
    create_sites_csv(&[
        "Pasar,Cibeber,Kedaleman,Pasar Kranggot,5",
        "Minimarket,Cibeber,Kedaleman,Alfamart Kedaleman,6",
        "Pertokoan,Jombang,Masigit,Ruko Blok F,50",
        "Pasar,Jombang,Masigit,Pasar Jombang Wetan,52",
        "Rumah Sakit,Citangkil,Kebonsari,RSUD Cilegon,100",
        "Mall,Citangkil,Kebonsari,Cilegon Center,98",
    ])
}

#[test]
fn test_end_to_end_pipeline() {
    let file = segmentation_fixture();
    let params = MacroParams::default();

    let (raw, validated) = load_parking_sites(file.path().to_str().unwrap()).unwrap();
    assert_eq!(raw.height(), 6);
    let sites = validated.unwrap();
    assert_eq!(sites.len(), 6);

    let potentials = site_potentials(&sites, &params);
    assert_eq!(potentials.len(), 6);
    // Input order is preserved through the calculator.
    assert_eq!(potentials[0].site.site_name, "Pasar Kranggot");

    let neighborhoods = neighborhood_potentials(&potentials);
    assert_eq!(neighborhoods.len(), 3);
    assert_eq!(neighborhoods[0].district, "Cibeber");
    assert_eq!(neighborhoods[0].avg_parked, 11.0);

    let model = segment_sites(&sites, 3, 300, 1e-4, 42).unwrap().unwrap();
    assert_eq!(model.labels.len(), 6);

    // Three well-separated groups land on their expected centers.
    let centroids = model.sorted_centroids();
    assert!((centroids[0] - 5.5).abs() < 1.0);
    assert!((centroids[1] - 51.0).abs() < 1.5);
    assert!((centroids[2] - 99.0).abs() < 1.5);

    let categories = model.record_categories();
    assert_eq!(
        categories,
        vec![
            Category::Low,
            Category::Low,
            Category::Medium,
            Category::Medium,
            Category::High,
            Category::High,
        ]
    );
}

#[test]
fn test_segmentation_is_deterministic() {
    let file = segmentation_fixture();
    let (_, validated) = load_parking_sites(file.path().to_str().unwrap()).unwrap();
    let sites = validated.unwrap();

    let first = segment_sites(&sites, 3, 300, 1e-4, 42).unwrap().unwrap();
    let second = segment_sites(&sites, 3, 300, 1e-4, 42).unwrap().unwrap();

    assert_eq!(first.labels, second.labels);
    assert_eq!(first.centroids, second.centroids);
    assert_eq!(first.record_categories(), second.record_categories());
}

#[test]
fn test_label_ordering_invariant() {
    let file = segmentation_fixture();
    let (_, validated) = load_parking_sites(file.path().to_str().unwrap()).unwrap();
    let sites = validated.unwrap();
    let model = segment_sites(&sites, 3, 300, 1e-4, 42).unwrap().unwrap();

    let centroid_of = |category: Category| -> f64 {
        let cluster_id = model
            .categories
            .iter()
            .position(|&c| c == category)
            .unwrap();
        model.centroids[cluster_id]
    };
    assert!(centroid_of(Category::Low) <= centroid_of(Category::Medium));
    assert!(centroid_of(Category::Medium) <= centroid_of(Category::High));
}

#[test]
fn test_row_drop_safety() {
    // Five rows, two with non-numeric averages.
    let file = create_sites_csv(&[
        "Pasar,Cibeber,Kedaleman,Pasar Kranggot,120",
        "Minimarket,Cibeber,Kedaleman,Alfamart Kedaleman,tidak ada",
        "Pertokoan,Jombang,Masigit,Ruko Blok F,35",
        "Pasar,Jombang,Masigit,Pasar Jombang Wetan,",
        "Rumah Sakit,Citangkil,Kebonsari,RSUD Cilegon,88.5",
    ]);

    let (raw, validated) = load_parking_sites(file.path().to_str().unwrap()).unwrap();
    assert_eq!(raw.height(), 5);
    let sites = validated.unwrap();
    assert_eq!(sites.len(), 3);

    // City-wide macro figures never depend on the file contents.
    let params = MacroParams::default();
    let with_file = city_potential(&params);
    let without_file = city_potential(&params);
    assert_eq!(with_file, without_file);
    assert!((with_file.figures.daily - 27_466_500.0).abs() < 1e-6);
}

#[test]
fn test_schema_rejection() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Jenis,Kecamatan,Kelurahan,Lokasi").unwrap();
    writeln!(file, "Pasar,Cibeber,Kedaleman,Pasar Kranggot").unwrap();
    writeln!(file, "Minimarket,Cibeber,Kedaleman,Alfamart Kedaleman").unwrap();

    let (raw, validated) = load_parking_sites(file.path().to_str().unwrap()).unwrap();

    let err = validated.unwrap_err();
    assert_eq!(err.missing, vec!["RATA-RATA YANG PARKIR".to_string()]);

    // Raw pass-through keeps every original row and column.
    assert_eq!(raw.height(), 2);
    assert_eq!(raw.width(), 4);
}

#[test]
fn test_reference_macro_scenario() {
    let params = MacroParams {
        two_wheelers: 41_564,
        four_wheelers: 13_369,
        tariff: 2_000.0,
        pay_fraction_pct: 25.0,
        target_realization_pct: 80.0,
    };
    let city = city_potential(&params);

    assert!((city.paying_per_day - 13_733.25).abs() < 1e-9);
    assert!((city.figures.daily - 27_466_500.0).abs() < 1e-6);
    assert!((city.figures.yearly - 10_025_272_500.0).abs() < 1e-3);
    assert!((city.figures.target_daily - 21_973_200.0).abs() < 1e-6);

    // Linear scaling is exact at every granularity.
    assert_eq!(city.figures.monthly, city.figures.daily * 30.0);
    assert_eq!(city.figures.yearly, city.figures.daily * 365.0);
}

#[test]
fn test_target_below_potential_for_all_granularities() {
    let file = segmentation_fixture();
    let (_, validated) = load_parking_sites(file.path().to_str().unwrap()).unwrap();
    let sites = validated.unwrap();

    let params = MacroParams::default();
    let city = city_potential(&params);
    assert!(city.figures.target_daily <= city.figures.daily + 1e-9);

    let potentials = site_potentials(&sites, &params);
    for sp in &potentials {
        assert!(sp.figures.target_daily <= sp.figures.daily + 1e-9);
        assert!(sp.figures.target_monthly <= sp.figures.monthly + 1e-9);
        assert!(sp.figures.target_yearly <= sp.figures.yearly + 1e-9);
    }

    for nb in neighborhood_potentials(&potentials) {
        assert!(nb.figures.target_daily <= nb.figures.daily + 1e-9);
        assert!(nb.figures.target_yearly <= nb.figures.yearly + 1e-9);
    }
}

#[test]
fn test_empty_validated_set_is_quiet() {
    // Every row fails coercion; the run must stay on the normal path.
    let file = create_sites_csv(&[
        "Pasar,Cibeber,Kedaleman,Pasar Kranggot,belum disurvei",
        "Minimarket,Cibeber,Kedaleman,Alfamart Kedaleman,belum disurvei",
    ]);

    let (raw, validated) = load_parking_sites(file.path().to_str().unwrap()).unwrap();
    assert_eq!(raw.height(), 2);
    let sites = validated.unwrap();
    assert!(sites.is_empty());

    let params = MacroParams::default();
    assert!(site_potentials(&sites, &params).is_empty());
    assert!(segment_sites(&sites, 3, 300, 1e-4, 42).unwrap().is_none());
}
