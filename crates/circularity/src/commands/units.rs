use circularity_core::parser::UnitFamily;
use comfy_table::{presets::UTF8_FULL, Table};

pub fn unit_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Family", "Canonical", "Symbols"]);

    for family in UnitFamily::RESOLUTION_ORDER {
        let symbols: Vec<&str> = family.units().iter().map(|unit| unit.symbol()).collect();
        table.add_row(vec![
            family.to_string(),
            family.canonical_unit().to_string(),
            symbols.join(", "),
        ]);
    }
    table
}

pub fn run() {
    println!("{}", unit_table());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_family_with_its_canonical_unit() {
        let rendered = unit_table().to_string();
        for (family, canonical) in [
            ("Area", "M2"),
            ("Energy", "J"),
            ("Volume", "M3"),
            ("Mass", "KG"),
            ("Distance", "M"),
        ] {
            assert!(rendered.contains(family), "missing {family}");
            assert!(rendered.contains(canonical), "missing {canonical}");
        }
        assert!(rendered.contains("KWH"));
    }
}
