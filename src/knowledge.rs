//! Fixed reference documents seeded into the base pool at startup.

use crate::rag::pool::Document;

pub fn base_catalog() -> Vec<Document> {
    vec![
        Document {
            id: "kb-balcony-membranes".to_string(),
            title: "Balcony Membrane Lifespan and Replacement".to_string(),
            text: concat!(
                "In coastal British Columbia, exposed balcony membranes typically have a ",
                "service life of approximately 15 to 25 years, depending on UV exposure, ",
                "drainage, and maintenance. Common deficiencies include membrane cracks, ",
                "failures at door thresholds, and poor slope leading to ponding. ",
                "When membranes are at or beyond their expected service life, or when ",
                "leaks are observed below, replacement should be considered a high priority."
            )
            .to_string(),
            report_id: None,
            filename: None,
        },
        Document {
            id: "kb-parkade-cracking".to_string(),
            title: "Parkade Slab Cracking and Risk".to_string(),
            text: concat!(
                "Hairline shrinkage cracks in parkade slabs are common and often not ",
                "structurally significant, provided there is no differential movement, ",
                "spalling, or corrosion staining. Wider cracks, active water leakage, ",
                "or rust staining at reinforcing steel indicate a higher risk of ",
                "long-term deterioration. In such cases, further structural assessment ",
                "and localized repair are recommended."
            )
            .to_string(),
            report_id: None,
            filename: None,
        },
        Document {
            id: "kb-rainscreen-bc".to_string(),
            title: "Rainscreen Requirements in British Columbia".to_string(),
            text: concat!(
                "Rainscreen wall assemblies became common practice in coastal BC in the ",
                "mid to late 1990s, following widespread moisture-related building envelope ",
                "failures. For many municipalities in the Lower Mainland, rainscreen ",
                "requirements were adopted around 1996\u{2013}1999. Older buildings without ",
                "rainscreen cladding generally have a higher risk of concealed moisture ",
                "damage, particularly at balconies, window interfaces, and roof-wall junctions."
            )
            .to_string(),
            report_id: None,
            filename: None,
        },
        Document {
            id: "kb-maintenance-planning".to_string(),
            title: "Maintenance Planning and Prioritization".to_string(),
            text: concat!(
                "For strata corporations, maintenance and renewal projects are typically ",
                "prioritized based on safety, active leakage, risk of further deterioration, ",
                "and impact on the building\u{2019}s operation. Life-safety issues and active leaks ",
                "are normally addressed first, followed by building envelope renewals, ",
                "parkade repairs, and aesthetic upgrades. A depreciation report should ",
                "provide a 30-year roadmap for major renewals."
            )
            .to_string(),
            report_id: None,
            filename: None,
        },
    ]
}
