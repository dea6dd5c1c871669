use std::fmt;

/// raw address fields as typed by the user
#[derive(Debug, Default, Hash, PartialEq, Eq, Clone)]
pub struct AddressInput {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

impl AddressInput {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zipcode: zipcode.into(),
        }
    }
}

/// The cleaned address returned by Smarty.
///
/// Every component is optional: Smarty omits the ones it could not resolve.
#[derive(Debug, Default, Hash, PartialEq, Eq, Clone)]
pub struct NormalizedAddress {
    pub primary_number: Option<String>,
    pub street_name: Option<String>,
    pub street_suffix: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub plus4: Option<String>,
    pub dpv_code: Option<String>,
}

impl NormalizedAddress {
    /// ZIP+4, falling back to `0000` when there is no plus4 code
    pub fn full_zip(&self) -> String {
        format!("{}-{}", field(&self.zipcode), self.plus4.as_deref().unwrap_or("0000"))
    }

    /// two-line postal rendering, absent components are left blank
    pub fn formatted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} {}",
            field(&self.primary_number),
            field(&self.street_name),
            field(&self.street_suffix),
        )?;
        write!(f, "{}, {} {}", field(&self.city), field(&self.state), self.full_zip())
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn infinite_loop() -> NormalizedAddress {
        NormalizedAddress {
            primary_number: Some("1".into()),
            street_name: Some("Infinite".into()),
            street_suffix: Some("Loop".into()),
            city: Some("Cupertino".into()),
            state: Some("CA".into()),
            zipcode: Some("95014".into()),
            plus4: None,
            dpv_code: Some("Y".into()),
        }
    }

    #[test]
    fn full_zip_pads_missing_plus4() {
        let mut address = infinite_loop();
        assert_eq!(address.full_zip(), "95014-0000");

        address.plus4 = Some("2083".into());
        assert_eq!(address.full_zip(), "95014-2083");
    }

    #[test]
    fn formats_two_lines() {
        assert_eq!(infinite_loop().formatted(), "1 Infinite Loop\nCupertino, CA 95014-0000");
    }

    #[test]
    fn absent_components_render_blank() {
        let address = NormalizedAddress {
            street_name: Some("Main".into()),
            city: Some("Austin".into()),
            state: Some("TX".into()),
            ..Default::default()
        };
        assert_eq!(address.formatted(), " Main \nAustin, TX -0000");
    }
}
