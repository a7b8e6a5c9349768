use crate::{
    fortran::ValueKind,
    sao::format::{DATA_INDEX_SIZE, SAO_DESCRIPTORS},
};

/// [SaoBuilder] formats one synthetic SAO record
#[derive(Debug, Clone, Default)]
pub struct SaoBuilder {
    /// (group index, values count, formatted lines)
    groups: Vec<(usize, u32, Vec<String>)>,
}

impl SaoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares (or replaces) one group with its already formatted lines
    pub fn group(mut self, index: usize, count: u32, lines: &[&str]) -> Self {
        self.groups.retain(|(group, _, _)| *group != index);
        self.groups.push((
            index,
            count,
            lines.iter().map(|line| line.to_string()).collect(),
        ));
        self.groups.sort_by_key(|(index, _, _)| *index);
        self
    }

    /// Declares one numerical group, formatted with its own descriptor
    pub fn f64_group(self, index: usize, values: &[f64]) -> Self {
        let descriptor = SAO_DESCRIPTORS[index];
        let precision = descriptor.precision.unwrap_or(0) as usize;
        let lines = values
            .chunks(descriptor.repeat)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|v| match descriptor.kind {
                        ValueKind::Scientific => {
                            format!("{:>w$.2e}", v, w = descriptor.width)
                        },
                        _ => format!("{:>w$.p$}", v, w = descriptor.width, p = precision),
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        let lines = lines.iter().map(|s| s.as_str()).collect::<Vec<_>>();
        self.group(index, values.len() as u32, &lines)
    }

    /// Time stamp group
    pub fn time_stamp(self, stamp: &str) -> Self {
        self.group(2, stamp.len() as u32, &[stamp])
    }

    /// Formats the data index only
    pub fn data_index(&self) -> String {
        let mut index = [0_u32; DATA_INDEX_SIZE];
        for (group, count, _) in self.groups.iter() {
            index[*group] = *count;
        }
        let mut content = String::new();
        for line in index.chunks(40) {
            for count in line {
                content.push_str(&format!("{:3}", count));
            }
            content.push('\n');
        }
        content
    }

    pub fn build(&self) -> String {
        let mut content = self.data_index();
        for (_, _, lines) in self.groups.iter() {
            for line in lines {
                content.push_str(line);
                content.push('\n');
            }
        }
        content
    }
}
