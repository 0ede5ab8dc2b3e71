//! Coordination number determination: multiple methods normalize the
//! distances to neighbors, the largest gap in each normalized sequence gives
//! a coordination number, and the most confident method is selected.

mod methods;
pub use self::methods::CnMethod;

mod gap;
pub use self::gap::{GapResult, analyze_gaps, analyze_site, candidate_methods, max_gap};

mod select;
pub use self::select::{BestMethod, MethodSelection};
pub use self::select::{connected_neighbors, filter_connections, select_best_method, select_methods};
