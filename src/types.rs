use crate::model::TypeTag;

/// Multiplicative effectiveness over every (attacker type, defender type)
/// pair. Pairs absent from the chart contribute 1.0.
pub fn type_effectiveness(attacker_types: &[TypeTag], defender_types: &[TypeTag]) -> f64 {
    let mut multiplier = 1.0;
    for att in attacker_types {
        for def in defender_types {
            if let Some(factor) = pair_effectiveness(&att.name, &def.name) {
                multiplier *= factor;
            }
        }
    }
    multiplier
}

/// Partial chart: only the fire/water/grass/electric rows the catalogue app
/// ever shipped. Everything else is treated as neutral.
fn pair_effectiveness(attacking: &str, defending: &str) -> Option<f64> {
    let atk = attacking.to_ascii_lowercase();
    let def = defending.to_ascii_lowercase();
    match atk.as_str() {
        "fire" => match def.as_str() {
            "grass" => Some(2.0),
            "water" | "fire" => Some(0.5),
            _ => None,
        },
        "water" => match def.as_str() {
            "fire" => Some(2.0),
            "grass" | "water" => Some(0.5),
            _ => None,
        },
        "grass" => match def.as_str() {
            "water" => Some(2.0),
            "fire" | "grass" => Some(0.5),
            _ => None,
        },
        "electric" => match def.as_str() {
            "water" => Some(2.0),
            "grass" | "electric" => Some(0.5),
            _ => None,
        },
        _ => None,
    }
}

static TYPE_COLORS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "normal" => "#A8A77A",
    "fire" => "#EE8130",
    "water" => "#6390F0",
    "electric" => "#F7D02C",
    "grass" => "#7AC74C",
    "ice" => "#96D9D6",
    "fighting" => "#C22E28",
    "poison" => "#A33EA1",
    "ground" => "#E2BF65",
    "flying" => "#A98FF3",
    "psychic" => "#F95587",
    "bug" => "#A6B91A",
    "rock" => "#B6A136",
    "ghost" => "#735797",
    "dragon" => "#6F35FC",
    "dark" => "#705746",
    "steel" => "#B7B7CE",
    "fairy" => "#D685AD",
};

/// Display color for a type name, `#000000` for unknown types.
pub fn type_color(name: &str) -> &'static str {
    TYPE_COLORS
        .get(name.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or("#000000")
}
