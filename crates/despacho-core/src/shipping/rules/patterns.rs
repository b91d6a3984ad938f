//! Common regex patterns for shipping data extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Pre-sale order number: "PREVENTA #27967", "Pre-venta N° 1234", "preventa: 555"
    pub static ref ORDER_NUMBER: Regex = Regex::new(
        r"(?i)pre[\s\-]*venta[\s\-]*(?:n\s*[°º]|nro\.?|no\.?|n[uú]mero|number|num\.?|#|:)?[\s:#\-]*([0-9]{3,})"
    ).unwrap();

    // Email pattern
    pub static ref EMAIL: Regex = Regex::new(
        r"(?i)[A-Z0-9._%+\-]+@[A-Z0-9.\-]+\.[A-Z]{2,}"
    ).unwrap();

    // RUT: 12.345.678-5, 12345678-K, 7 654 321-0. ASCII digits only.
    pub static ref RUT: Regex = Regex::new(
        r"(?-u:\b)([0-9]{1,3}(?:[.\s]?[0-9]{3}){1,2}-[0-9kK])(?-u:\b)"
    ).unwrap();

    // Chilean phone after separator stripping: +56912345678, 56912345678, 912345678
    pub static ref PHONE: Regex = Regex::new(
        r"(?:\+?56)?[0-9]{9,11}(?-u:\b)"
    ).unwrap();

    // Separators removed before the phone search: horizontal spaces of any
    // width, parentheses and hyphens. Line breaks are kept.
    pub static ref PHONE_SEPARATORS: Regex = Regex::new(
        r"[\p{Zs}\t\x0B\x0C\u{feff}()\-]"
    ).unwrap();

    // Flag keywords, matched against normalized text
    pub static ref POR_PAGAR: Regex = Regex::new(r"\bpor\s*pagar\b").unwrap();

    pub static ref PAGADO: Regex = Regex::new(r"\bpagado\b").unwrap();

    pub static ref DESPACHO_A_DOMICILIO: Regex = Regex::new(
        r"\bdespacho\s*a\s*domicilio\b"
    ).unwrap();

    pub static ref DOMICILIO: Regex = Regex::new(r"\bdomicilio\b").unwrap();

    pub static ref SUCURSAL: Regex = Regex::new(r"\bsucursal\b").unwrap();

    pub static ref COURIER: Regex = Regex::new(
        r"\b(?:starken|chilexpress|correos)\b"
    ).unwrap();
}
