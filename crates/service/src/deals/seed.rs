use crate::deals::model::Deal;

#[allow(clippy::too_many_arguments)]
fn deal(
    id: u64,
    seller: &str,
    buyer: &str,
    country: &str,
    technology: &str,
    capacity: i64,
    term: &str,
    date: &str,
) -> Deal {
    Deal {
        id,
        seller: seller.into(),
        buyer: buyer.into(),
        country: country.into(),
        technology: technology.into(),
        capacity,
        term: term.into(),
        date: date.into(),
    }
}

/// Sample deals installed at startup when seeding is enabled.
pub fn seed_deals() -> Vec<Deal> {
    vec![
        deal(1, "Solar Power Company", "Big Corporate Buyer", "Spain", "Solar", 100, "12 months", "2021-01-15"),
        deal(2, "Wind Energy Ltd", "Tech Giant Inc", "Germany", "Offshore Wind", 250, "24 months", "2021-03-02"),
        deal(3, "Another Power Seller", "Retail Chain SA", "France", "Onshore Wind", 75, "36 months", "2021-05-20"),
        deal(4, "Sunny Days Energy", "Big Corporate Buyer", "Italy", "Solar", 50, "12 months", "2021-07-11"),
        deal(5, "Solar Power Company", "Data Centre Group", "Belgium", "Solar", 120, "60 months", "2021-09-30"),
    ]
}
