/// Separator between category names in a rendered path
pub const PATH_SEPARATOR: &str = " > ";

/// Category names from the vehicle down to the node being visited.
///
/// Segments are optional because feeds may leave a category unnamed; a path
/// with a missing segment cannot be rendered and its parts are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPath {
    segments: Vec<Option<String>>,
}

impl CategoryPath {
    /// Path rooted at a vehicle
    pub fn root(vehicle: Option<&str>) -> Self {
        Self {
            segments: vec![vehicle.map(str::to_string)],
        }
    }

    /// A copy of this path extended by one child segment
    pub fn child(&self, name: Option<&str>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(name.map(str::to_string));
        Self { segments }
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Join the segments with [`PATH_SEPARATOR`], or `None` if any is missing
    pub fn render(&self) -> Option<String> {
        let names = self
            .segments
            .iter()
            .map(|s| s.as_deref())
            .collect::<Option<Vec<&str>>>()?;
        Some(names.join(PATH_SEPARATOR))
    }
}
