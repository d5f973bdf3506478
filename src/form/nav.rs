/// Menu-driven section switcher: at most one section active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionNav {
    sections: Vec<String>,
    active: Option<usize>,
}

impl SectionNav {
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    /// Activate `id`, deactivating whatever was active. Unknown ids leave
    /// the current selection untouched.
    pub fn activate(&mut self, id: &str) {
        if let Some(pos) = self.sections.iter().position(|s| s == id) {
            self.active = Some(pos);
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.sections[i].as_str())
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active() == Some(id)
    }
}
