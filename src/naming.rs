use crate::constants::{HOSTNAME_LABEL_MAX_LEN, HOSTNAME_MAX_LEN, THING_NAME_MAX_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Empty,
    TooLong,
    InvalidCharacter(char),
    EmptyLabel,
    LabelTooLong,
    HyphenAtLabelEdge,
}

// AWS IoT thing names: 1-128 chars of [a-zA-Z0-9:_-]
pub fn validate_thing_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::Empty);
    }
    if name.len() > THING_NAME_MAX_LEN {
        return Err(Error::TooLong);
    }
    match name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '-')))
    {
        Some(c) => Err(Error::InvalidCharacter(c)),
        None => Ok(()),
    }
}

// RFC 1123 hostname, a single trailing dot is tolerated
pub fn validate_hostname(hostname: &str) -> Result<(), Error> {
    let hostname = hostname.strip_suffix('.').unwrap_or(hostname);
    if hostname.is_empty() {
        return Err(Error::Empty);
    }
    if hostname.len() > HOSTNAME_MAX_LEN {
        return Err(Error::TooLong);
    }

    for label in hostname.split('.') {
        if label.is_empty() {
            return Err(Error::EmptyLabel);
        }
        if label.len() > HOSTNAME_LABEL_MAX_LEN {
            return Err(Error::LabelTooLong);
        }
        if let Some(c) = label
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
        {
            return Err(Error::InvalidCharacter(c));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::HyphenAtLabelEdge);
        }
    }

    Ok(())
}

/// Region of an AWS IoT data endpoint such as
/// `xxxxxxxx-ats.iot.sa-east-1.amazonaws.com`, if the hostname has that shape.
pub fn aws_region(endpoint: &str) -> Option<&str> {
    let rest = endpoint.strip_suffix(".amazonaws.com")?;
    let (prefix, region) = rest.rsplit_once('.')?;
    let (account, service) = prefix.rsplit_once('.')?;

    if service != "iot" || account.is_empty() || region.is_empty() {
        return None;
    }

    Some(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_thing_names() {
        assert_eq!(validate_thing_name("dispositivo-da-palhoca-93"), Ok(()));
        assert_eq!(validate_thing_name("sensor:kitchen_01"), Ok(()));
    }

    #[test]
    fn rejects_thing_names() {
        assert_eq!(validate_thing_name(""), Err(Error::Empty));
        assert_eq!(
            validate_thing_name("living room"),
            Err(Error::InvalidCharacter(' '))
        );
        assert_eq!(
            validate_thing_name("garage/door"),
            Err(Error::InvalidCharacter('/'))
        );

        let long = [b'a'; THING_NAME_MAX_LEN + 1];
        let long = core::str::from_utf8(&long).unwrap();
        assert_eq!(validate_thing_name(long), Err(Error::TooLong));
        assert_eq!(validate_thing_name(&long[1..]), Ok(()));
    }

    #[test]
    fn accepts_hostnames() {
        assert_eq!(
            validate_hostname("a2dx2ashpy96ot-ats.iot.sa-east-1.amazonaws.com"),
            Ok(())
        );
        assert_eq!(validate_hostname("localhost"), Ok(()));
        assert_eq!(validate_hostname("broker.local."), Ok(()));
    }

    #[test]
    fn rejects_hostnames() {
        assert_eq!(validate_hostname(""), Err(Error::Empty));
        assert_eq!(validate_hostname("."), Err(Error::Empty));
        assert_eq!(validate_hostname("iot..amazonaws.com"), Err(Error::EmptyLabel));
        assert_eq!(validate_hostname("-iot.example.com"), Err(Error::HyphenAtLabelEdge));
        assert_eq!(validate_hostname("iot-.example.com"), Err(Error::HyphenAtLabelEdge));
        assert_eq!(
            validate_hostname("mqtts://broker.example.com"),
            Err(Error::InvalidCharacter(':'))
        );
        assert_eq!(
            validate_hostname("broker.example.com:8883"),
            Err(Error::InvalidCharacter(':'))
        );

        let label = [b'a'; HOSTNAME_LABEL_MAX_LEN + 1];
        let label = core::str::from_utf8(&label).unwrap();
        assert_eq!(validate_hostname(label), Err(Error::LabelTooLong));
    }

    #[test]
    fn extracts_aws_region() {
        assert_eq!(
            aws_region("a2dx2ashpy96ot-ats.iot.sa-east-1.amazonaws.com"),
            Some("sa-east-1")
        );
        assert_eq!(aws_region("abc.iot.eu-west-1.amazonaws.com"), Some("eu-west-1"));
        assert_eq!(aws_region("s3.eu-west-1.amazonaws.com"), None);
        assert_eq!(aws_region("broker.example.com"), None);
        assert_eq!(aws_region(".iot.eu-west-1.amazonaws.com"), None);
    }
}
