//! Serialización textual de la red generada y reporte de consola.
//!
//! Formato de salida: tabla de especies con columnas alineadas a la
//! izquierda, línea en blanco, una línea por (reacción de condensación ×
//! catalizador), línea en blanco, una línea por (reacción de clivaje ×
//! catalizador). Una reacción sin catalizadores no emite ninguna línea.

use std::fmt::Write as _;

use achem_core::GeneratedNetwork;

/// Contadores de lo efectivamente escrito, para el reporte de depuración.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub cond_lines: usize,
    pub cll_lines: usize,
}

/// Tasa en forma textual: las enteras llevan un decimal ("1.0", no "1"),
/// igual que vienen escritas en los ficheros de entrada.
fn fmt_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{rate:.1}")
    } else {
        rate.to_string()
    }
}

/// Construye el cuerpo del fichero de salida y sus contadores.
pub fn render_network(network: &GeneratedNetwork) -> (String, WriteSummary) {
    let mut out = String::new();

    let mut widths = [0usize; 3];
    for sp in &network.species {
        widths[0] = widths[0].max(sp.name.len());
        widths[1] = widths[1].max(sp.concentration.len());
        widths[2] = widths[2].max(sp.contribution.len());
    }
    for sp in &network.species {
        let _ = writeln!(out,
                         "{:<w0$}\t{:<w1$}\t{:<w2$}",
                         sp.name,
                         sp.concentration,
                         sp.contribution,
                         w0 = widths[0],
                         w1 = widths[1],
                         w2 = widths[2]);
    }
    out.push('\n');

    let mut summary = WriteSummary { cond_lines: 0, cll_lines: 0 };
    for r in &network.cond_reactions {
        for catalyzer in &r.catalyzers {
            let _ = writeln!(out,
                             "{} + {} + {} > {} + {} ; {}",
                             r.reagent_1, r.reagent_2, catalyzer, r.product, catalyzer, fmt_rate(r.rate));
            summary.cond_lines += 1;
        }
    }
    out.push('\n');

    for r in &network.cll_reactions {
        for catalyzer in &r.catalyzers {
            let _ = writeln!(out,
                             "{} + {} > {} + {} + {} ; {}",
                             r.reactant, catalyzer, r.product_1, r.product_2, catalyzer, fmt_rate(r.rate));
            summary.cll_lines += 1;
        }
    }

    (out, summary)
}

/// Cola de depuración anexada al fichero cuando `-debug` está activo.
pub fn debug_trailer(new_species: usize, summary: WriteSummary) -> String {
    format!("\n# Debug Summary:\n# Total new species generated: {}\n# Total cond reaction lines written: {}\n# Total cll reaction lines written: {}\n",
            new_species, summary.cond_lines, summary.cll_lines)
}

/// Reporte de consola con el resumen de la corrida y los catalizadores.
pub fn render_report(network: &GeneratedNetwork, seed_species: usize, summary: WriteSummary) -> String {
    let mut out = String::new();
    let new_species = network.species.len().saturating_sub(seed_species);
    let _ = writeln!(out, "The chemical file has been generated. Here's some info!");
    let _ = writeln!(out, "{new_species} new species have been generated");
    let _ = writeln!(out, "{} condensation reaction lines have been written", summary.cond_lines);
    let _ = writeln!(out, "{} cleavage reaction lines have been written", summary.cll_lines);

    let _ = writeln!(out, "\nCondensation catalyzers for this chemical are:");
    for a in &network.catalyzers.cond {
        let _ = writeln!(out,
                         "\t- {} is assigned to template R-{} + {}-R",
                         a.species, a.template.suffix, a.template.prefix);
    }
    let _ = writeln!(out, "\nCleavage catalyzers for this chemical are:");
    for a in &network.catalyzers.cll {
        let _ = writeln!(out, "\t- {} is assigned to template R-{}-R", a.species, a.template.core());
    }
    out
}
