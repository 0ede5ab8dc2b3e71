use std::collections::BTreeMap;

use log::warn;
use ndarray::{Array1, Array2};

use crate::math::{least_squares, solve_symmetric};
use crate::systems::BondPair;
use super::data::literature_radius;

/// Strategy used to refine atomic radii from the observed shortest
/// distances between elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RadiusRefinement {
    /// Stay as close as possible to the literature CIF radii (in relative
    /// terms), while making the radii of alphabetically adjacent elements
    /// add up exactly to their shortest distance
    #[default]
    AdjacentPairs,
    /// Least-squares fit of `r_i + r_j` to the shortest distance of every
    /// observed pair of elements
    AllPairs,
}

/// Refine the radius of every element in `elements` (sorted and unique)
/// from the shortest distance between each pair of elements.
///
/// Elements which are not part of any observed pair do not get a refined
/// radius. This function only depends on its inputs, so calling it twice
/// gives the same result.
#[time_graph::instrument(name = "refine_radii")]
pub fn refine_radii(
    elements: &[&str],
    shortest: &BTreeMap<BondPair, f64>,
    strategy: RadiusRefinement,
) -> BTreeMap<String, f64> {
    debug_assert!(elements.windows(2).all(|w| w[0] < w[1]), "elements must be sorted and unique");

    if elements.is_empty() {
        return BTreeMap::new();
    }

    if let [element] = elements {
        let mut radii = BTreeMap::new();
        if let Some(distance) = shortest.get(&BondPair::new(element, element)) {
            radii.insert((*element).to_owned(), 0.5 * distance);
        }
        return radii;
    }

    match strategy {
        RadiusRefinement::AdjacentPairs => {
            match adjacent_pairs(elements, shortest) {
                Ok(radii) => radii,
                Err(reason) => {
                    warn!("can not refine radii with adjacent pairs ({}), using a fit on all pairs instead", reason);
                    all_pairs(elements, shortest)
                }
            }
        }
        RadiusRefinement::AllPairs => all_pairs(elements, shortest),
    }
}

/// Minimize `Σ ((r_i - o_i) / o_i)^2` where `o_i` is the literature radius,
/// under the constraints `r_i + r_{i+1} = d_{i, i+1}`. The corresponding
/// KKT system is
///
/// ```text
/// | 2 W   Cᵀ | | r |   | 2 W o |
/// |  C    0  | | λ | = |   d   |
/// ```
///
/// with `W = diag(1 / o_i^2)` and `C` the constraints matrix.
fn adjacent_pairs(elements: &[&str], shortest: &BTreeMap<BondPair, f64>) -> Result<BTreeMap<String, f64>, String> {
    let n_elements = elements.len();
    let n_constraints = n_elements - 1;

    let mut reference = Vec::with_capacity(n_elements);
    for element in elements {
        let radius = literature_radius(element)
            .and_then(|radius| radius.cif)
            .ok_or_else(|| format!("missing CIF radius for {}", element))?;
        reference.push(radius);
    }

    let size = n_elements + n_constraints;
    let mut matrix = Array2::zeros((size, size));
    let mut rhs = Array1::zeros(size);

    for (i, &radius) in reference.iter().enumerate() {
        let weight = 1.0 / (radius * radius);
        matrix[[i, i]] = 2.0 * weight;
        rhs[i] = 2.0 * weight * radius;
    }

    for (k, window) in elements.windows(2).enumerate() {
        let pair = BondPair::new(window[0], window[1]);
        let distance = shortest.get(&pair)
            .ok_or_else(|| format!("no {} pair in the structure", pair))?;

        let row = n_elements + k;
        for i in [k, k + 1] {
            matrix[[row, i]] = 1.0;
            matrix[[i, row]] = 1.0;
        }
        rhs[row] = *distance;
    }

    let solution = solve_symmetric(matrix, &rhs);

    return Ok(elements.iter()
        .zip(solution.iter())
        .map(|(element, &radius)| ((*element).to_owned(), radius))
        .collect());
}

/// Least-squares fit of `r_i + r_j ≈ d_ij` over all observed pairs of
/// elements
fn all_pairs(elements: &[&str], shortest: &BTreeMap<BondPair, f64>) -> BTreeMap<String, f64> {
    let index = |element: &str| elements.iter().position(|&e| e == element);

    let mut equations = Vec::new();
    for (pair, &distance) in shortest {
        if let (Some(i), Some(j)) = (index(pair.first()), index(pair.second())) {
            equations.push((i, j, distance));
        }
    }

    if equations.is_empty() {
        return BTreeMap::new();
    }

    let mut design = Array2::zeros((equations.len(), elements.len()));
    let mut target = Array1::zeros(equations.len());
    let mut observed = vec![false; elements.len()];
    for (row, &(i, j, distance)) in equations.iter().enumerate() {
        design[[row, i]] += 1.0;
        design[[row, j]] += 1.0;
        target[row] = distance;
        observed[i] = true;
        observed[j] = true;
    }

    let solution = least_squares(&design, &target);

    return elements.iter()
        .enumerate()
        .filter(|&(i, _)| observed[i])
        .map(|(i, element)| ((*element).to_owned(), solution[i]))
        .collect();
}
