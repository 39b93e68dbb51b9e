use natal_chart::format::{format_dms, format_longitude};
use natal_chart::zodiac::ALL_ELEMENTS;
use natal_chart::ChartResult;
use std::fmt::Write;

/// Plain-text report: bodies, houses, aspects and element counts.
pub fn render(chart: &ChartResult) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, chart)?;
    Ok(out)
}

fn write_report(out: &mut String, chart: &ChartResult) -> std::fmt::Result {
    writeln!(out, "Julian Day {:.6} ({:?})", chart.julian_day, chart.source)?;
    writeln!(out)?;
    writeln!(out, "{:<2} {:<10} {:<12} {:>10} {:>9}  R", "", "Body", "Sign", "Position", "Longitude")?;
    for body in &chart.bodies {
        writeln!(
            out,
            "{:<2} {:<10} {:<12} {:>10} {:>9}  {}",
            body.name.glyph(),
            body.name.name(),
            body.sign.name(),
            format_dms(body.longitude),
            format_longitude(body.longitude),
            if body.retrograde { "R" } else { "" }
        )?;
    }

    writeln!(out)?;
    match &chart.houses {
        Some(houses) => {
            writeln!(out, "Houses ({})", houses.system)?;
            for cusp in &houses.houses {
                writeln!(
                    out,
                    "{:>2} {:<5} {:<12} {:>10}",
                    cusp.number,
                    cusp.name.name(),
                    cusp.sign.name(),
                    format_dms(cusp.longitude)
                )?;
            }
        }
        None => writeln!(out, "Houses unavailable")?,
    }

    writeln!(out)?;
    writeln!(out, "Aspects")?;
    if chart.aspects.is_empty() {
        writeln!(out, "  none")?;
    }
    for aspect in &chart.aspects {
        writeln!(
            out,
            "  {} {} {} {:<11} orb {:.2}°",
            aspect.body_a.name(),
            aspect.kind.glyph(),
            aspect.body_b.name(),
            aspect.kind.name(),
            aspect.orb
        )?;
    }

    writeln!(out)?;
    let counts: Vec<String> = ALL_ELEMENTS
        .iter()
        .map(|e| format!("{} {}", e.name(), chart.element_tally.get(e).copied().unwrap_or(0)))
        .collect();
    writeln!(out, "Elements: {}", counts.join(", "))?;
    Ok(())
}
