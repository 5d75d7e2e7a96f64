//! Presentation layer: currency formatting, console tables, and Plotters charts
//!
//! The calculator emits unrounded floats; every display rounding happens
//! here, once, at render time.

use plotters::prelude::*;

use crate::model::{Category, SegmentationModel};
use crate::potential::{CityPotential, MacroParams, NeighborhoodPotential, SitePotential};

/// Chart colors per category, Low to High
const CATEGORY_COLORS: [RGBColor; 3] = [
    RGBColor(25, 118, 210),  // Low: blue
    RGBColor(255, 179, 0),   // Medium: amber
    RGBColor(211, 47, 47),   // High: red
];

fn category_color(category: Category) -> RGBColor {
    match category {
        Category::Low => CATEGORY_COLORS[0],
        Category::Medium => CATEGORY_COLORS[1],
        Category::High => CATEGORY_COLORS[2],
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format an amount as rupiah with dot-separated thousands, e.g.
/// `Rp 27.466.500`. This is the single place a figure gets rounded.
pub fn format_rupiah(amount: f64) -> String {
    format!("Rp {}", group_thousands(amount.round() as i64))
}

/// Format a vehicle count with dot-separated thousands.
pub fn format_count(value: u64) -> String {
    group_thousands(value as i64)
}

/// Print the city-wide macro summary block.
pub fn print_city_summary(params: &MacroParams, city: &CityPotential) {
    println!("=== City Macro Summary ===");
    println!(
        "Total vehicles: {} (two-wheelers {}, four-wheelers {})",
        format_count(city.total_vehicles),
        format_count(params.two_wheelers),
        format_count(params.four_wheelers)
    );
    println!(
        "Paying vehicles / day: {:.2} ({}% of total)",
        city.paying_per_day, params.pay_fraction_pct
    );
    println!(
        "Potential: daily {} | monthly {} | yearly {}",
        format_rupiah(city.figures.daily),
        format_rupiah(city.figures.monthly),
        format_rupiah(city.figures.yearly)
    );
    println!(
        "Target ({}% of potential): daily {} | monthly {} | yearly {}",
        params.target_realization_pct,
        format_rupiah(city.figures.target_daily),
        format_rupiah(city.figures.target_monthly),
        format_rupiah(city.figures.target_yearly)
    );
}

/// Print the per-site potential and target table, in input order.
pub fn print_site_table(potentials: &[SitePotential]) {
    println!("\n=== Potential & Target per Site ===");
    println!(
        "{:<14.14} {:<14.14} {:<26.26} {:>10} {:>12} {:>16} {:>16}",
        "District", "Subdistrict", "Site", "Avg parked", "Paying/day", "Daily potential", "Daily target"
    );
    for sp in potentials {
        println!(
            "{:<14.14} {:<14.14} {:<26.26} {:>10.1} {:>12.2} {:>16} {:>16}",
            sp.site.district,
            sp.site.subdistrict,
            sp.site.site_name,
            sp.site.avg_parked,
            sp.paying_per_day,
            format_rupiah(sp.figures.daily),
            format_rupiah(sp.figures.target_daily)
        );
    }
}

/// Print the per-neighborhood table plus a ranking of the strongest
/// neighborhoods by daily potential.
pub fn print_neighborhood_table(neighborhoods: &[NeighborhoodPotential], top_n: usize) {
    println!("\n=== Potential & Target per Neighborhood ===");
    println!(
        "{:<14.14} {:<14.14} {:>10} {:>12} {:>16} {:>16} {:>18}",
        "District", "Subdistrict", "Avg parked", "Paying/day", "Daily potential", "Daily target", "Yearly potential"
    );
    for nb in neighborhoods {
        println!(
            "{:<14.14} {:<14.14} {:>10.1} {:>12.2} {:>16} {:>16} {:>18}",
            nb.district,
            nb.subdistrict,
            nb.avg_parked,
            nb.paying_per_day,
            format_rupiah(nb.figures.daily),
            format_rupiah(nb.figures.target_daily),
            format_rupiah(nb.figures.yearly)
        );
    }

    let mut ranked: Vec<&NeighborhoodPotential> = neighborhoods.iter().collect();
    ranked.sort_by(|a, b| b.figures.daily.total_cmp(&a.figures.daily));

    println!("\nTop neighborhoods by daily potential:");
    for (i, nb) in ranked.iter().take(top_n).enumerate() {
        println!(
            "  {}. {} ({}) — {}",
            i + 1,
            nb.subdistrict,
            nb.district,
            format_rupiah(nb.figures.daily)
        );
    }
}

/// Print segmentation statistics to console
pub fn print_segmentation_report(model: &SegmentationModel) {
    let total_sites = model.labels.len();

    println!("\n=== Segmentation Report ===");
    println!("Number of clusters: {}", model.n_clusters);
    println!("Total sites: {}", total_sites);
    println!("Within-cluster sum of squares (inertia): {:.2}", model.inertia);

    println!("\nCategory distribution:");
    for (category, count) in model.category_counts() {
        let percentage = (count as f64 / total_sites as f64) * 100.0;
        println!("  {:<6} {} sites ({:.1}%)", category, count, percentage);
    }

    let sorted = model.sorted_centroids();
    let rendered: Vec<String> = sorted.iter().map(|c| format!("{c:.1}")).collect();
    println!("\nCentroids, ascending (avg parked / day): {}", rendered.join(", "));
}

/// Create scatter plot of sites colored by category
///
/// # Arguments
/// * `potentials` - Per-site figures, aligned with the model's labels
/// * `model` - Fitted segmentation model
/// * `params` - Macro parameters, used to place centroid markers
/// * `output_path` - Path to save the PNG plot
/// * `plot_title` - Title for the plot
pub fn create_segmentation_scatter(
    potentials: &[SitePotential],
    model: &SegmentationModel,
    params: &MacroParams,
    output_path: &str,
    plot_title: Option<&str>,
) -> crate::Result<()> {
    let title = plot_title.unwrap_or("Site Segmentation: Avg Parked vs Daily Potential");

    let x_values: Vec<f64> = potentials.iter().map(|p| p.site.avg_parked).collect();
    let y_values: Vec<f64> = potentials.iter().map(|p| p.figures.daily).collect();

    let x_min = x_values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let x_max = x_values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let y_min = y_values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let y_max = y_values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let x_pad = ((x_max - x_min) * 0.05).max(1.0);
    let y_pad = ((y_max - y_min) * 0.05).max(1.0);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min - x_pad..x_max + x_pad, y_min - y_pad..y_max + y_pad)?;

    chart
        .configure_mesh()
        .x_desc("Average vehicles parked / day")
        .y_desc("Daily potential (Rp)")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (i, (&x, &y)) in x_values.iter().zip(y_values.iter()).enumerate() {
        let color = category_color(model.category_of(i));
        chart.draw_series(std::iter::once(Circle::new((x, y), 4, color.filled())))?;
    }

    // Centroid markers, placed on the same tariff line as the sites
    let pay_ratio = params.pay_fraction_pct / 100.0;
    for (cluster_id, &centroid) in model.centroids.iter().enumerate() {
        let category = model.categories[cluster_id];
        let color = category_color(category);
        let centroid_daily = centroid * pay_ratio * params.tariff;
        let marker = (x_pad * 0.4, y_pad * 0.4);

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (centroid - marker.0, centroid_daily - marker.1),
                    (centroid + marker.0, centroid_daily + marker.1),
                ],
                color.filled(),
            )))?
            .label(format!("{category} centroid ({centroid:.1})"))
            .legend(move |(x, y)| Rectangle::new([(x, y), (x + 10, y + 10)], color.filled()));
    }

    chart.configure_series_labels().draw()?;

    root.present()?;
    println!("Segmentation plot saved to: {}", output_path);

    Ok(())
}

/// Create a bar chart of the category distribution
pub fn create_category_chart(model: &SegmentationModel, output_path: &str) -> crate::Result<()> {
    let counts = model.category_counts();
    let max_count = counts.iter().map(|&(_, n)| n).max().unwrap_or(1) as f64;

    let root = BitMapBackend::new(output_path, (600, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Sites per Category", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..(counts.len() as f64), 0f64..(max_count * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Category rank (Low to High)")
        .y_desc("Number of sites")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (rank, &(category, count)) in counts.iter().enumerate() {
        let color = category_color(category);
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(rank as f64 + 0.1, 0.0), (rank as f64 + 0.9, count as f64)],
                color.filled(),
            )))?
            .label(format!("{category}: {count}"))
            .legend(move |(x, y)| Rectangle::new([(x, y), (x + 10, y + 10)], color.filled()));
    }

    chart.configure_series_labels().draw()?;

    root.present()?;
    println!("Category chart saved to: {}", output_path);

    Ok(())
}

/// Generate the full segmentation report: scatter plot, category chart, and
/// console statistics
pub fn generate_visualization_report(
    potentials: &[SitePotential],
    model: &SegmentationModel,
    params: &MacroParams,
    base_output_path: &str,
) -> crate::Result<()> {
    create_segmentation_scatter(potentials, model, params, base_output_path, None)?;

    let category_chart_path = base_output_path.replace(".png", "_categories.png");
    create_category_chart(model, &category_chart_path)?;

    print_segmentation_report(model);

    Ok(())
}
