use crate::query::builder::OrderDirection;

///
/// SortSpec
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub direction: OrderDirection,
}

/// Parse grid sort directives into ordered sort specs.
///
/// `sidx` is a comma-separated list of `field` or `field asc|desc`
/// entries; entries without their own direction take the request-level
/// `sord` default. The default direction is ascending.
#[must_use]
pub fn parse_sort(sidx: &str, sord: &str) -> Vec<SortSpec> {
    let default_direction = parse_direction(sord);

    sidx.split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return None;
            }

            let (field, direction) = match entry.rsplit_once(char::is_whitespace) {
                Some((field, tail)) if tail == "asc" || tail == "desc" => {
                    (field.trim(), parse_direction(tail))
                }
                _ => (entry, default_direction),
            };

            Some(SortSpec {
                field: field.to_string(),
                direction,
            })
        })
        .collect()
}

fn parse_direction(raw: &str) -> OrderDirection {
    // Anything that is not explicitly descending sorts ascending.
    if raw == "desc" {
        OrderDirection::Desc
    } else {
        OrderDirection::Asc
    }
}
