use crate::{Estado, Fecha, Rut, TenderCode};

#[test]
fn fecha_accepts_eight_digits() {
    let fecha = Fecha::try_from("11062025").unwrap();
    assert_eq!(fecha.as_str(), "11062025");
}

#[test]
fn fecha_rejects_other_shapes() {
    for raw in ["2025-06-11", "1106202", "110620255", "1106202a", ""] {
        assert!(Fecha::try_from(raw).is_err(), "{raw:?} should be rejected");
    }
}

#[test]
fn estado_accepts_the_allowed_set_case_insensitively() {
    assert_eq!(Estado::try_from("publicada").unwrap(), Estado::Publicada);
    assert_eq!(Estado::try_from("Adjudicada").unwrap(), Estado::Adjudicada);
    assert_eq!(Estado::try_from("TODOS").unwrap(), Estado::Todos);
    assert_eq!(Estado::try_from("activas").unwrap().as_query(), "activas");
}

#[test]
fn estado_rejects_unknown_values() {
    assert!(Estado::try_from("invalido").is_err());
    assert!(Estado::try_from("").is_err());
}

#[test]
fn tender_code_accepts_digit_digit_alnum() {
    for raw in ["2669-126-L125", "1057539-17-LR25", "1-1-A"] {
        let code = TenderCode::try_from(raw).unwrap();
        assert_eq!(code.as_str(), raw);
    }
}

#[test]
fn tender_code_rejects_malformed_codes() {
    for raw in [
        "",
        "2669-126",
        "2669-126-L125-X",
        "abc-126-L125",
        "2669--L125",
        "2669-126-",
        "2669-126-L1_25",
    ] {
        assert!(TenderCode::try_from(raw).is_err(), "{raw:?} should be rejected");
    }
}

#[test]
fn rut_is_cleaned_and_formatted_for_the_upstream() {
    assert_eq!(Rut::try_from("775969407").unwrap().as_query(), "77.596.940-7");
    assert_eq!(
        Rut::try_from("77.596.940-7").unwrap().as_query(),
        "77.596.940-7"
    );
    assert_eq!(Rut::try_from("12345678k").unwrap().as_query(), "12.345.678-K");
    assert_eq!(Rut::try_from("1-9").unwrap().as_query(), "1-9");
}

#[test]
fn rut_rejects_inputs_shorter_than_two_characters() {
    for raw in ["", "7", "x", "--"] {
        assert!(Rut::try_from(raw).is_err(), "{raw:?} should be rejected");
    }
}
