use super::labeled;

/// Number of values per line, in the body
const VALUES_PER_LINE: usize = 16;

/// One map to be formatted
#[derive(Debug, Clone, Default)]
pub struct TestMap {
    pub number: u32,
    /// (year, month, day, hour, minute, second)
    pub epoch: Option<(i32, u8, u8, u8, u8, u8)>,
    /// (latitude, lon1, lon2, dlon, height, raw values)
    pub rows: Vec<(f64, f64, f64, f64, f64, Vec<i64>)>,
    /// EXPONENT record, ahead of the first row
    pub exponent: Option<i8>,
}

/// [IonexBuilder] formats synthetic IONEX files
#[derive(Debug, Clone)]
pub struct IonexBuilder {
    dimension: u8,
    exponent: Option<i8>,
    height: (f64, f64, f64),
    latitude: (f64, f64, f64),
    longitude: (f64, f64, f64),
    body: String,
}

impl IonexBuilder {
    pub fn new(latitude: (f64, f64, f64), longitude: (f64, f64, f64)) -> Self {
        Self {
            dimension: 2,
            exponent: Some(-1),
            height: (450.0, 450.0, 0.0),
            latitude,
            longitude,
            body: String::new(),
        }
    }

    pub fn with_exponent(mut self, exponent: Option<i8>) -> Self {
        self.exponent = exponent;
        self
    }

    pub fn with_heights(mut self, height: (f64, f64, f64)) -> Self {
        self.dimension = if height.2 > 0.0 { 3 } else { 2 };
        self.height = height;
        self
    }

    /// Appends one map of given kind ("TEC", "RMS", "HEIGHT")
    pub fn map(mut self, kind: &str, map: &TestMap) -> Self {
        self.body
            .push_str(&labeled(&format!("{:6}", map.number), &format!("START OF {} MAP", kind)));
        if let Some((y, m, d, hh, mm, ss)) = map.epoch {
            self.body.push_str(&labeled(
                &format!("{:6}{:6}{:6}{:6}{:6}{:6}", y, m, d, hh, mm, ss),
                "EPOCH OF CURRENT MAP",
            ));
        }
        if let Some(exponent) = map.exponent {
            self.body
                .push_str(&labeled(&format!("{:6}", exponent), "EXPONENT"));
        }
        for (lat, lon1, lon2, dlon, h, values) in map.rows.iter() {
            self.body.push_str(&labeled(
                &format!("  {:6.1}{:6.1}{:6.1}{:6.1}{:6.1}", lat, lon1, lon2, dlon, h),
                "LAT/LON1/LON2/DLON/H",
            ));
            self.body.push_str(&values_lines(values));
        }
        self.body
            .push_str(&labeled(&format!("{:6}", map.number), &format!("END OF {} MAP", kind)));
        self
    }

    /// Appends raw content to the body
    pub fn raw(mut self, content: &str) -> Self {
        self.body.push_str(content);
        self
    }

    pub fn header(&self) -> String {
        let mut content = labeled(
            "     1.0            IONOSPHERE MAPS     GPS",
            "IONEX VERSION / TYPE",
        );
        content.push_str(&labeled("  3600", "INTERVAL"));
        content.push_str(&labeled("    10.0", "ELEVATION CUTOFF"));
        content.push_str(&labeled(&format!("{:6}", self.dimension), "MAP DIMENSION"));
        content.push_str(&labeled(&axis(self.height), "HGT1 / HGT2 / DHGT"));
        content.push_str(&labeled(&axis(self.latitude), "LAT1 / LAT2 / DLAT"));
        content.push_str(&labeled(&axis(self.longitude), "LON1 / LON2 / DLON"));
        if let Some(exponent) = self.exponent {
            content.push_str(&labeled(&format!("{:6}", exponent), "EXPONENT"));
        }
        content.push_str(&labeled("", "END OF HEADER"));
        content
    }

    pub fn build(&self) -> String {
        let mut content = self.header();
        content.push_str(&self.body);
        content
    }
}

fn axis((start, end, spacing): (f64, f64, f64)) -> String {
    format!("  {:6.1}{:6.1}{:6.1}", start, end, spacing)
}

/// Formats raw values, 16 per line, 5 wide each
pub fn values_lines(values: &[i64]) -> String {
    let mut content = String::new();
    for chunk in values.chunks(VALUES_PER_LINE) {
        for value in chunk {
            content.push_str(&format!("{:5}", value));
        }
        content.push('\n');
    }
    content
}
