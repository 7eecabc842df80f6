use std::fmt;

/// Changes between two adjacent commits, attributed to the newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub author: String,
    pub timestamp: String,
    /// Older commit of the pair
    pub from_commit: String,
    /// Newer commit of the pair
    pub to_commit: String,
    /// Raw `git diff` output, never parsed
    pub body: String,
}

impl DiffSegment {
    pub fn to_markdown(&self) -> String {
        let mut out = format!(
            "### 作者: {}\n#### 提交时间: {}\n{}",
            self.author, self.timestamp, self.body
        );
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

/// Full change report for one page, newest pair first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    segments: Vec<DiffSegment>,
}

impl Report {
    pub fn new(segments: Vec<DiffSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[DiffSegment] {
        &self.segments
    }

    pub fn to_markdown(&self) -> String {
        self.segments
            .iter()
            .map(DiffSegment::to_markdown)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}
