/// Standings analysis for the chess standings service.
///
/// This module holds everything between a decoded spreadsheet and the final
/// combined table. It performs no I/O.
///
/// Submodules:
/// - `normalize`: raw grid to typed standing rows.
/// - `ranking`: individual and team podiums of one tournament.
/// - `aggregate`: weighted cross-tournament points and the combined table.

pub mod aggregate;
pub mod normalize;
pub mod ranking;
