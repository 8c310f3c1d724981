use iar_model::{ExtractedFields, RiskType};

/// Impact columns paired with the risk each one signals when filled in.
///
/// Availability, confidentiality and integrity map onto the register's
/// operational, reputational and financial risk categories.
pub fn impact_columns(fields: &ExtractedFields) -> [(&str, RiskType); 3] {
    [
        (fields.availability_impact.as_str(), RiskType::Operational),
        (fields.confidentiality_impact.as_str(), RiskType::Reputational),
        (fields.integrity_impact.as_str(), RiskType::Financial),
    ]
}

/// Risk categories for any non-empty impact column, in column order.
pub fn classify_risks(fields: &ExtractedFields) -> Vec<RiskType> {
    impact_columns(fields)
        .into_iter()
        .filter(|(value, _)| !value.is_empty())
        .map(|(_, risk)| risk)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_impact_column_adds_its_risk() {
        let mut fields = ExtractedFields {
            availability_impact: "High".to_string(),
            ..ExtractedFields::default()
        };
        assert_eq!(classify_risks(&fields), vec![RiskType::Operational]);

        fields.integrity_impact = "Low".to_string();
        fields.confidentiality_impact = "Medium".to_string();
        assert_eq!(
            classify_risks(&fields),
            vec![
                RiskType::Operational,
                RiskType::Reputational,
                RiskType::Financial
            ]
        );
    }

    #[test]
    fn any_text_counts_as_present() {
        let fields = ExtractedFields {
            confidentiality_impact: "n/a".to_string(),
            ..ExtractedFields::default()
        };
        assert_eq!(classify_risks(&fields), vec![RiskType::Reputational]);
        assert!(classify_risks(&ExtractedFields::default()).is_empty());
    }
}
