//! The set of communes drawn on the map.

use fire_map_fire_models::CommuneCode;
use fire_map_geography_models::Commune;
use geo::Rect;

use crate::CommuneBoundary;

/// An ordered collection of commune boundaries.
///
/// Order is the order of the source file and is preserved by every
/// operation, so joined outputs line up with the boundaries index by index.
#[derive(Debug, Clone, Default)]
pub struct BoundaryLayer {
    boundaries: Vec<CommuneBoundary>,
}

impl BoundaryLayer {
    #[must_use]
    pub const fn new(boundaries: Vec<CommuneBoundary>) -> Self {
        Self { boundaries }
    }

    /// Keeps only the communes of one department.
    #[must_use]
    pub fn for_departement(self, departement: &str) -> Self {
        let departement = departement.trim();
        let total = self.boundaries.len();
        let boundaries: Vec<CommuneBoundary> = self
            .boundaries
            .into_iter()
            .filter(|b| b.commune.department_code.eq_ignore_ascii_case(departement))
            .collect();

        log::debug!(
            "Department {departement}: kept {} of {total} communes",
            boundaries.len()
        );

        Self { boundaries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CommuneBoundary> {
        self.boundaries.iter()
    }

    #[must_use]
    pub fn boundaries(&self) -> &[CommuneBoundary] {
        &self.boundaries
    }

    /// Iterates over the commune attributes, in layer order.
    pub fn communes(&self) -> impl Iterator<Item = &Commune> {
        self.boundaries.iter().map(|b| &b.commune)
    }

    /// Bounding rectangle of every commune, `None` for an empty layer.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.boundaries
            .iter()
            .filter_map(CommuneBoundary::bounds)
            .reduce(|a, b| {
                Rect::new(
                    geo::coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                    geo::coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
                )
            })
    }

    #[must_use]
    pub fn by_code(&self, code: &CommuneCode) -> Option<&CommuneBoundary> {
        self.boundaries.iter().find(|b| &b.commune.code == code)
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&CommuneBoundary> {
        self.boundaries.iter().find(|b| b.commune.name == name)
    }

    /// Unique commune names in alphabetical order (the commune picker order).
    #[must_use]
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.communes().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl<'a> IntoIterator for &'a BoundaryLayer {
    type Item = &'a CommuneBoundary;
    type IntoIter = std::slice::Iter<'a, CommuneBoundary>;

    fn into_iter(self) -> Self::IntoIter {
        self.boundaries.iter()
    }
}
