use html_escape::encode_text;

use crate::models::{fmt_text, fmt_unit, ClassifiedListing};

/// Field label / value pairs shown on a listing's detail card.
pub fn detail_fields(listing: &ClassifiedListing<'_>) -> Vec<(&'static str, String)> {
    let r = listing.record;
    let locality = r.locality();

    vec![
        ("단지명", r.building.clone()),
        ("위치", if locality.is_empty() { "N/A".to_string() } else { locality }),
        ("주택유형", fmt_text(r.housing_type.as_deref())),
        ("계약유형", fmt_text(r.lease_type.as_deref())),
        ("보증금", fmt_unit(r.deposit, "만원")),
        ("거래금액", fmt_unit(r.transaction_amount, "만원")),
        ("전세가율", fmt_unit(r.jeonse_ratio, "%")),
        ("건축년도", fmt_text(r.build_year)),
        ("층", fmt_text(r.floor)),
        ("위험점수", listing.classification.score.to_string()),
        ("위험등급", listing.classification.tier.to_string()),
    ]
}

/// HTML fragment for the detail card of one listing.
pub fn detail_html(listing: &ClassifiedListing<'_>) -> String {
    let c = &listing.classification;
    let mut html = format!(
        "<div class=\"listing-card\" data-record=\"{}\"><h3 style=\"border-left:6px solid {}\">{}</h3><table>",
        listing.record.id,
        c.bucket.color(),
        encode_text(&listing.record.building),
    );

    for (label, value) in detail_fields(listing) {
        html.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>",
            label,
            encode_text(&value)
        ));
    }

    html.push_str("</table></div>");
    html
}
