use std::collections::BTreeSet;

/// Chemical symbols of all the known elements, in order of atomic number
pub const ELEMENT_SYMBOLS: [&str; 118] = [
    "H", "He",
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe",
    "Cs", "Ba",
    "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu",
    "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra",
    "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr",
    "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Check if `symbol` is the chemical symbol of a known element
pub fn is_element(symbol: &str) -> bool {
    ELEMENT_SYMBOLS.contains(&symbol)
}

/// Get the element implied by a site label, i.e. the chemical symbol the
/// label starts with. Two-letter symbols are preferred over one-letter ones,
/// so `"Co1"` gives `"Co"` and `"C1A"` gives `"C"`.
///
/// Returns `None` if the label does not start with an element symbol.
pub fn element_from_label(label: &str) -> Option<&'static str> {
    let mut chars = label.chars();
    let first = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }

    if let Some(second) = chars.next() {
        if second.is_ascii_lowercase() {
            let candidate = format!("{}{}", first, second);
            if let Some(symbol) = lookup(&candidate) {
                return Some(symbol);
            }
        }
    }

    return lookup(&label[..first.len_utf8()]);
}

fn lookup(symbol: &str) -> Option<&'static str> {
    ELEMENT_SYMBOLS.iter().copied().find(|&s| s == symbol)
}

/// An unordered pair of element symbols (or site labels), stored with the
/// two members in alphabetical order.
///
/// `BondPair` serializes to a single `"A-B"` string, so it can be used as the
/// key of JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BondPair {
    first: String,
    second: String,
}

impl BondPair {
    /// Create a new pair from two members, in any order
    pub fn new(a: &str, b: &str) -> BondPair {
        if a <= b {
            BondPair { first: a.into(), second: b.into() }
        } else {
            BondPair { first: b.into(), second: a.into() }
        }
    }

    /// Get the alphabetically first member of this pair
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Get the alphabetically second member of this pair
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Is this a pair of two identical members?
    pub fn is_homonuclear(&self) -> bool {
        self.first == self.second
    }

    /// Does this pair contain the given member?
    pub fn contains(&self, member: &str) -> bool {
        self.first == member || self.second == member
    }
}

impl std::fmt::Display for BondPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

impl serde::Serialize for BondPair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: serde::Serializer {
        serializer.collect_str(self)
    }
}

/// Get all the unordered pairs (including homonuclear ones) that can be
/// built from the given members.
pub fn all_pairs<'a>(members: impl IntoIterator<Item = &'a str>) -> BTreeSet<BondPair> {
    let members = members.into_iter().collect::<BTreeSet<_>>().into_iter().collect::<Vec<_>>();

    let mut pairs = BTreeSet::new();
    for (i, a) in members.iter().enumerate() {
        for b in &members[i..] {
            pairs.insert(BondPair::new(a, b));
        }
    }
    return pairs;
}
