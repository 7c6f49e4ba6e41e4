//! Deterministic offline record synthesis.
//!
//! Every value is derived from a 64-bit FNV-1a hash of the query, so the same
//! text always yields the same category, colour, position and labels, across
//! calls and across processes. No randomness is involved.

use cosmiclens_core::{CelestialRecord, PlotPosition};

/// Name used when the query is blank.
pub const UNNAMED_SIGNAL: &str = "Uncharted Signal";

/// A family of objects the generator can synthesize.
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub category: &'static str,
    pub color: &'static str,
    /// Keywords that map a free-form category onto this archetype.
    keywords: &'static [&'static str],
    x_band: (f64, f64),
    y_band: (f64, f64),
    distance: (u64, u64, &'static str),
    mass: (u64, u64, &'static str),
    temperature: (u64, u64),
    discovered: (u64, u64),
    blurb: &'static str,
    fact: &'static str,
}

pub const ARCHETYPES: &[Archetype] = &[
    Archetype {
        category: "Black Hole",
        color: "#bc13fe",
        keywords: &["black hole", "singularity"],
        x_band: (55.0, 95.0),
        y_band: (70.0, 100.0),
        distance: (1_500, 90_000, "Light Years"),
        mass: (5, 40, "Solar Masses"),
        temperature: (1, 60),
        discovered: (1964, 2024),
        blurb: "Its gravity is strong enough that not even light escapes once it crosses the event horizon.",
        fact: "Matter spiralling into it is heated until it glows in X-rays.",
    },
    Archetype {
        category: "Exoplanet",
        color: "#34d399",
        keywords: &["planet", "world", "earth"],
        x_band: (25.0, 55.0),
        y_band: (30.0, 60.0),
        distance: (4, 3_000, "Light Years"),
        mass: (1, 320, "Earth Masses"),
        temperature: (90, 2_400),
        discovered: (1992, 2024),
        blurb: "It was found by the tiny dip in starlight it causes each time it crosses its host star.",
        fact: "A single year there lasts only a few weeks of Earth time.",
    },
    Archetype {
        category: "Nebula",
        color: "#00f3ff",
        keywords: &["nebula", "cloud", "pillar"],
        x_band: (45.0, 70.0),
        y_band: (40.0, 65.0),
        distance: (400, 20_000, "Light Years"),
        mass: (10, 5_000, "Solar Masses"),
        temperature: (10, 12_000),
        discovered: (1764, 2024),
        blurb: "Its glowing gas is being sculpted by the radiation of young stars forming inside it.",
        fact: "Despite its brilliance, it is thinner than the best vacuum made on Earth.",
    },
    Archetype {
        category: "Galaxy",
        color: "#d8b4fe",
        keywords: &["galaxy", "galaxies", "cluster"],
        x_band: (75.0, 100.0),
        y_band: (15.0, 45.0),
        distance: (2, 13_000, "Million Light Years"),
        mass: (1, 1_500, "Billion Solar Masses"),
        temperature: (3, 10_000_000),
        discovered: (1771, 2024),
        blurb: "Hundreds of billions of stars orbit its core, bound together by dark matter.",
        fact: "The light reaching us left it before humans existed.",
    },
    Archetype {
        category: "Pulsar",
        color: "#00ff9d",
        keywords: &["pulsar", "neutron", "magnetar"],
        x_band: (60.0, 80.0),
        y_band: (55.0, 75.0),
        distance: (300, 30_000, "Light Years"),
        mass: (1, 3, "Solar Masses"),
        temperature: (500_000, 3_000_000),
        discovered: (1967, 2024),
        blurb: "It spins many times per second, sweeping beams of radio emission across the sky like a lighthouse.",
        fact: "A teaspoon of its material would weigh about a billion tonnes on Earth.",
    },
    Archetype {
        category: "Quasar",
        color: "#fbbf24",
        keywords: &["quasar", "blazar"],
        x_band: (88.0, 100.0),
        y_band: (85.0, 100.0),
        distance: (1, 13, "Billion Light Years"),
        mass: (1, 70, "Billion Solar Masses"),
        temperature: (50_000, 900_000),
        discovered: (1959, 2024),
        blurb: "It is powered by a supermassive black hole devouring gas at the heart of a distant galaxy.",
        fact: "It outshines every star of its host galaxy combined.",
    },
    Archetype {
        category: "Hypergiant",
        color: "#ff6347",
        keywords: &["hypergiant", "supergiant", "giant"],
        x_band: (15.0, 40.0),
        y_band: (80.0, 100.0),
        distance: (500, 12_000, "Light Years"),
        mass: (20, 150, "Solar Masses"),
        temperature: (3_000, 35_000),
        discovered: (1840, 2024),
        blurb: "It sheds its outer layers so quickly that it is wrapped in a shell of its own dust.",
        fact: "Placed where the Sun is, its surface would swallow the orbit of Jupiter.",
    },
    Archetype {
        category: "White Dwarf",
        color: "#ffffff",
        keywords: &["white dwarf"],
        x_band: (5.0, 25.0),
        y_band: (10.0, 30.0),
        distance: (8, 1_500, "Light Years"),
        mass: (1, 1, "Solar Masses"),
        temperature: (4_000, 100_000),
        discovered: (1862, 2024),
        blurb: "It is the exposed core of a dead star, slowly cooling over billions of years.",
        fact: "It packs the mass of the Sun into a sphere about the size of Earth.",
    },
    Archetype {
        category: "Red Dwarf",
        color: "#ef4444",
        keywords: &["red dwarf", "dwarf", "star"],
        x_band: (0.0, 20.0),
        y_band: (5.0, 25.0),
        distance: (4, 400, "Light Years"),
        mass: (1, 1, "Solar Masses"),
        temperature: (2_300, 3_900),
        discovered: (1915, 2024),
        blurb: "It burns its hydrogen so slowly that it will outlive every larger star in the galaxy.",
        fact: "Its violent flares can briefly double its brightness.",
    },
    Archetype {
        category: "Comet",
        color: "#a9a9a9",
        keywords: &["comet", "asteroid", "oort"],
        x_band: (0.0, 20.0),
        y_band: (0.0, 12.0),
        distance: (1, 50_000, "Astronomical Units"),
        mass: (1, 900, "Trillion Kilograms"),
        temperature: (30, 400),
        discovered: (1680, 2024),
        blurb: "Its icy nucleus grows a glowing tail each time its orbit brings it near the Sun.",
        fact: "Its tail always points away from the Sun, even when it is moving outward.",
    },
];

/// 64-bit FNV-1a over the UTF-8 bytes.
pub fn stable_hash(s: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    s.bytes().fold(OFFSET, |h, b| (h ^ u64::from(b)).wrapping_mul(PRIME))
}

/// Decorrelate one hash into independent draws via the splitmix64 finalizer.
fn mix(h: u64, salt: u64) -> u64 {
    let mut z = h ^ salt.wrapping_mul(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn draw(h: u64, salt: u64, lo: u64, hi: u64) -> u64 {
    lo + mix(h, salt) % (hi - lo + 1)
}

/// Fraction in [0, 1] with 1/1000 resolution.
fn unit(h: u64, salt: u64) -> f64 {
    (mix(h, salt) % 1001) as f64 / 1000.0
}

fn band(h: u64, salt: u64, (lo, hi): (f64, f64)) -> f64 {
    let v = lo + unit(h, salt) * (hi - lo);
    (v * 10.0).round() / 10.0
}

/// The archetype a query hashes to.
pub fn archetype_for(query: &str) -> &'static Archetype {
    let h = stable_hash(query);
    &ARCHETYPES[(mix(h, 1) % ARCHETYPES.len() as u64) as usize]
}

/// Archetype whose keywords appear in a free-form category, if any.
pub fn archetype_matching(category: &str) -> Option<&'static Archetype> {
    let c = category.to_lowercase();
    ARCHETYPES
        .iter()
        .find(|a| a.keywords.iter().any(|k| c.contains(k)))
}

/// Synthesize a complete record for an arbitrary query.
pub fn simulate(query: &str) -> CelestialRecord {
    let name = display_name(query);
    let archetype = archetype_for(query.trim());
    let h = stable_hash(query.trim());
    let position = PlotPosition::clamped(band(h, 2, archetype.x_band), band(h, 3, archetype.y_band));
    build(&name, archetype.category, archetype, position, archetype.color)
}

/// Synthesize labels for an object whose name, category, position and colour
/// are already known (a seed catalog hit). Labels follow the matching
/// archetype, or the hashed one when the category is unfamiliar.
pub fn simulate_known(name: &str, category: &str, position: PlotPosition, color: &str) -> CelestialRecord {
    let archetype = archetype_matching(category).unwrap_or_else(|| archetype_for(name));
    build(name, category, archetype, position, color)
}

fn display_name(query: &str) -> String {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        UNNAMED_SIGNAL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn build(
    name: &str,
    category: &str,
    archetype: &Archetype,
    position: PlotPosition,
    color: &str,
) -> CelestialRecord {
    let h = stable_hash(name);
    let (dlo, dhi, dunit) = archetype.distance;
    let (mlo, mhi, munit) = archetype.mass;
    let (tlo, thi) = archetype.temperature;
    let (ylo, yhi) = archetype.discovered;

    CelestialRecord {
        name: name.to_string(),
        category: category.to_string(),
        distance_label: format!("{} {}", group_thousands(draw(h, 4, dlo, dhi)), dunit),
        mass_label: format!("{} {}", group_thousands(draw(h, 5, mlo, mhi)), munit),
        temperature_label: format!("{} K", group_thousands(draw(h, 6, tlo, thi))),
        summary: format!(
            "{} is a {} reconstructed from the offline survey archive. {}",
            name,
            category.to_lowercase(),
            archetype.blurb
        ),
        highlight: archetype.fact.to_string(),
        discovered_label: draw(h, 7, ylo, yhi).to_string(),
        plot_position: Some(position),
        is_simulated: true,
        color_hint: Some(color.to_string()),
    }
}

/// 1234567 -> "1,234,567"
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_known_vectors() {
        assert_eq!(stable_hash(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(stable_hash("a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(10_000_000), "10,000,000");
    }

    #[test]
    fn bands_stay_inside_archetype_ranges() {
        for a in ARCHETYPES {
            for i in 0..200u64 {
                let x = band(i, 2, a.x_band);
                assert!(x >= a.x_band.0 && x <= a.x_band.1, "{} x={}", a.category, x);
            }
        }
    }

    #[test]
    fn draw_is_inclusive() {
        for i in 0..500u64 {
            let v = draw(i, 9, 1, 1);
            assert_eq!(v, 1);
            let w = draw(i, 9, 3, 5);
            assert!((3..=5).contains(&w));
        }
    }

    #[test]
    fn category_keywords() {
        assert_eq!(archetype_matching("Supermassive Black Hole").unwrap().category, "Black Hole");
        assert_eq!(archetype_matching("Red Supergiant").unwrap().category, "Hypergiant");
        assert_eq!(archetype_matching("Cometary Cloud").unwrap().category, "Nebula");
        assert!(archetype_matching("Mystery").is_none());
    }
}
