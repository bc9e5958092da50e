//! Parsing and balancing of chemical equations.
//!
//! Formulas are written in plain notation (`Fe2(SO4)3`, `K4[Fe(SCN)6]`), equations use `->` or
//! `→` between reactants and products. Balancing finds the smallest positive integer
//! coefficients with exact rational arithmetic.
//!
//! # Example
//! ```
//! use chemeq::Equation;
//!
//! let mut equation = Equation::parse("C2H6 + O2 -> CO2 + H2O").unwrap();
//! equation.balance().unwrap();
//!
//! assert_eq!(equation.to_string(), "2(C2H6) + 7(O2) -> 4(CO2) + 6(H2O)");
//! ```

pub mod balance;
pub mod coefficients;
pub mod composition;
pub mod compound;
pub mod element;
pub mod equation;
pub mod error;
pub mod resolve;
pub mod token;

pub use balance::balance;
pub use coefficients::CoefficientMap;
pub use composition::Composition;
pub use compound::Compound;
pub use element::Element;
pub use equation::Equation;
pub use error::{BalancingError, Error, Result};





#[cfg(test)]
mod tests {
    use super::*;

    fn test_equation(equation: &str, solved_equation: &str) {
        let mut eq = Equation::parse(equation).unwrap();
        eq.balance().unwrap();

        assert!(eq.is_balanced());
        assert!(eq.is_reduced());
        assert_eq!(eq.to_string(), solved_equation);
    }


    #[test]
    fn arrow_types() {
        for arrow in equation::ARROWS {
            let eq_str = format!("H2 + O2 {} H2O", arrow);
            let mut eq = Equation::parse(&eq_str).unwrap();
            eq.balance().unwrap();

            assert_eq!(eq.to_string(), "2(H2) + O2 -> 2(H2O)");
        }
    }

    #[test]
    fn written_coefficients_are_replaced() {
        test_equation("7H2 + 3O2 -> 5H2O", "2(H2) + O2 -> 2(H2O)");
    }

    #[test]
    fn unbalanceable() {
        let mut eq = Equation::parse("H2 -> O2").unwrap();
        match eq.balance() {
            Err(Error::Balancing(err)) => assert!(err.kernel().is_empty()),
            other => panic!("expected a balancing error, got {other:?}"),
        }
    }

    #[test]
    fn eq1() {
        test_equation("H2 + O2 -> H2O", "2(H2) + O2 -> 2(H2O)");
    }

    #[test]
    fn eq2() {
        test_equation("[Cr(N2H4CO)6]4[Cr(CN)6]3+KMnO4+H2SO4 -> K2Cr2O7+MnSO4+CO2+KNO3+K2SO4+H2O", "10([Cr(N2H4CO)6]4[Cr(CN)6]3) + 1176(KMnO4) + 1399(H2SO4) -> 35(K2Cr2O7) + 1176(MnSO4) + 420(CO2) + 660(KNO3) + 223(K2SO4) + 1879(H2O)");
    }

    #[test]
    fn eq3() {
        test_equation("P4O10 + H2O -> H3PO4", "P4O10 + 6(H2O) -> 4(H3PO4)");
    }

    #[test]
    fn eq4() {
        test_equation("CO2 + H2O -> C6H12O6 + O2", "6(CO2) + 6(H2O) -> C6H12O6 + 6(O2)");
    }

    #[test]
    fn eq5() {
        test_equation("SiCl4 + H2O -> H4SiO4 + HCl", "SiCl4 + 4(H2O) -> H4SiO4 + 4(HCl)");
    }

    #[test]
    fn eq6() {
        test_equation("Al + HCl -> AlCl3 + H2", "2(Al) + 6(HCl) -> 2(AlCl3) + 3(H2)");
    }

    #[test]
    fn eq7() {
        test_equation("Na2CO3 + HCl -> NaCl + H2O + CO2", "Na2CO3 + 2(HCl) -> 2(NaCl) + H2O + CO2");
    }

    #[test]
    fn eq8() {
        test_equation("C7H6O2 + O2 -> CO2 + H2O", "2(C7H6O2) + 15(O2) -> 14(CO2) + 6(H2O)");
    }

    #[test]
    fn eq9() {
        test_equation("Fe2(SO4)3 + KOH -> K2SO4 + Fe(OH)3", "Fe2(SO4)3 + 6(KOH) -> 3(K2SO4) + 2(Fe(OH)3)");
    }

    #[test]
    fn eq10() {
        test_equation("Ca3(PO4)2 + SiO2 -> P4O10 + 3CaSiO3", "2(Ca3(PO4)2) + 6(SiO2) -> P4O10 + 6(CaSiO3)");
    }

    #[test]
    fn eq11() {
        test_equation("KClO3 -> KClO4 + KCl", "4(KClO3) -> 3(KClO4) + KCl");
    }

    #[test]
    fn eq12() {
        test_equation("Al2(SO4)3 + Ca(OH)2 -> Al(OH)3 + CaSO4", "Al2(SO4)3 + 3(Ca(OH)2) -> 2(Al(OH)3) + 3(CaSO4)");
    }

    #[test]
    fn eq13() {
        test_equation("H2SO4 + HI -> H2S + I2 + H2O", "H2SO4 + 8(HI) -> H2S + 4(I2) + 4(H2O)");
    }

    #[test]
    fn eq14() {
        test_equation("C2H6 + O2 -> CO2 + H2O", "2(C2H6) + 7(O2) -> 4(CO2) + 6(H2O)");
    }

    #[test]
    fn eq15() {
        test_equation("NaN3 -> Na + N2", "2(NaN3) -> 2(Na) + 3(N2)");
    }

    #[test]
    fn eq16() {
        test_equation("Na + Fe2O3 -> Na2O + Fe", "6(Na) + Fe2O3 -> 3(Na2O) + 2(Fe)");
    }

    #[test]
    fn eq17() {
        test_equation("Mg + N2 -> Mg3N2", "3(Mg) + N2 -> Mg3N2");
    }

    #[test]
    fn eq18() {
        test_equation("Na + NH3 -> NaNH2 + H2", "2(Na) + 2(NH3) -> 2(NaNH2) + H2");
    }

    #[test]
    fn eq19() {
        test_equation("Na2O + CO2 + H2O -> NaHCO3", "Na2O + 2(CO2) + H2O -> 2(NaHCO3)");
    }

    #[test]
    fn eq20() {
        test_equation("P4S3 + O2 -> P4O6 + SO2", "P4S3 + 6(O2) -> P4O6 + 3(SO2)");
    }

    #[test]
    fn eq21() {
        test_equation("Na3PO4 + CaCl2 -> Ca3(PO4)2 + NaCl", "2(Na3PO4) + 3(CaCl2) -> Ca3(PO4)2 + 6(NaCl)");
    }

    #[test]
    fn eq22() {
        test_equation("C8H18 + O2 -> CO2 + H2O", "2(C8H18) + 25(O2) -> 16(CO2) + 18(H2O)");
    }

    #[test]
    fn eq23() {
        test_equation("C2H6O + O2 -> CO2 + H2O", "C2H6O + 3(O2) -> 2(CO2) + 3(H2O)");
    }

    #[test]
    fn eq24() {
        test_equation("Pb(NO3)2 + KI -> PbI2 + KNO3", "Pb(NO3)2 + 2(KI) -> PbI2 + 2(KNO3)");
    }

    #[test]
    fn eq25() {
        test_equation("N2O5 -> NO2 + O2", "2(N2O5) -> 4(NO2) + O2");
    }

    #[test]
    fn eq26() {
        test_equation("KClO3 -> KCl + O2", "2(KClO3) -> 2(KCl) + 3(O2)");
    }

    #[test]
    fn eq27() {
        test_equation("CO + O2 -> CO2", "2(CO) + O2 -> 2(CO2)");
    }

    #[test]
    fn eq28() {
        test_equation("C57H110O6 + O2 -> CO2 + H2O", "2(C57H110O6) + 163(O2) -> 114(CO2) + 110(H2O)");
    }

    #[test]
    fn eq29() {
        test_equation("K4[Fe(SCN)6] + K2Cr2O7 + H2SO4 -> Fe2(SO4)3 + Cr2(SO4)3 + CO2 + H2O + K2SO4 + KNO3", "6(K4[Fe(SCN)6]) + 97(K2Cr2O7) + 355(H2SO4) -> 3(Fe2(SO4)3) + 97(Cr2(SO4)3) + 36(CO2) + 355(H2O) + 91(K2SO4) + 36(KNO3)");
    }

    #[test]
    fn eq30() {
        test_equation("Al + H2SO4 -> Al2(SO4)3 + H2", "2(Al) + 3(H2SO4) -> Al2(SO4)3 + 3(H2)");
    }

    #[test]
    fn eq31() {
        test_equation("C7H10N + O2 -> CO2 + H2O + NO2", "2(C7H10N) + 21(O2) -> 14(CO2) + 10(H2O) + 2(NO2)");
    }

    #[test]
    fn eq32() {
        test_equation("Al(OH)3 + H2SO4 -> Al2(SO4)3 + H2O", "2(Al(OH)3) + 3(H2SO4) -> Al2(SO4)3 + 6(H2O)");
    }

    #[test]
    fn eq33() {
        test_equation("BaO + Al -> BaAl4 + Al2O3", "3(BaO) + 14(Al) -> 3(BaAl4) + Al2O3");
    }

    #[test]
    fn eq34() {
        test_equation("AgN3 -> N2 + Ag", "2(AgN3) -> 3(N2) + 2(Ag)");
    }

    #[test]
    fn eq35() {
        test_equation("Pt + HNO3 + HCl -> H2PtCl6 + NO2 + H2O", "Pt + 4(HNO3) + 6(HCl) -> H2PtCl6 + 4(NO2) + 4(H2O)");
    }

    #[test]
    fn eq36() {
        test_equation("LuCl3 + Ca -> Lu + CaCl2", "2(LuCl3) + 3(Ca) -> 2(Lu) + 3(CaCl2)");
    }

    #[test]
    fn eq37() {
        test_equation("XeF6 + H2O -> XeO3 + HF", "XeF6 + 3(H2O) -> XeO3 + 6(HF)");
    }

    #[test]
    fn eq38() {
        test_equation("Ba2XeO6 + H2SO4 -> BaSO4 + H2O + XeO4", "Ba2XeO6 + 2(H2SO4) -> 2(BaSO4) + 2(H2O) + XeO4");
    }

    #[test]
    fn eq39() {
        test_equation("P4O6 + H2O -> H3PO3", "P4O6 + 6(H2O) -> 4(H3PO3)");
    }

    #[test]
    fn eq40() {
        test_equation("C6H14 + O2 -> CO2 + H2O", "2(C6H14) + 19(O2) -> 12(CO2) + 14(H2O)");
    }

    #[test]
    fn eq41() {
        test_equation("MoS2 + O2 -> MoO3 + SO2", "2(MoS2) + 7(O2) -> 2(MoO3) + 4(SO2)");
    }

    #[test]
    fn eq42() {
        test_equation("K2MnF6 + SbF5 -> KSbF6 + MnF3 + F2", "2(K2MnF6) + 4(SbF5) -> 4(KSbF6) + 2(MnF3) + F2");
    }

    #[test]
    fn eq43() {
        test_equation("S + HNO3 -> H2SO4 + NO2 + H2O", "S + 6(HNO3) -> H2SO4 + 6(NO2) + 2(H2O)");
    }

    #[test]
    fn eq44() {
        test_equation("Cu + HNO3 -> Cu(NO3)2 + NO + H2O", "3(Cu) + 8(HNO3) -> 3(Cu(NO3)2) + 2(NO) + 4(H2O)");
    }

    #[test]
    fn eq45() {
        test_equation("CuS + HNO3 -> CuSO4 + NO2 + H2O", "CuS + 8(HNO3) -> CuSO4 + 8(NO2) + 4(H2O)");
    }

    #[test]
    fn eq46() {
        test_equation("Cu2S + HNO3 -> Cu(NO3)2 + CuSO4 + NO2 + H2O", "Cu2S + 12(HNO3) -> Cu(NO3)2 + CuSO4 + 10(NO2) + 6(H2O)");
    }

    #[test]
    fn eq47() {
        test_equation("NaBr + NaBrO3 + H2SO4 -> Br2 + Na2SO4 + H2O", "5(NaBr) + NaBrO3 + 3(H2SO4) -> 3(Br2) + 3(Na2SO4) + 3(H2O)");
    }

    #[test]
    fn eq48() {
        test_equation("KNO3 + C12H22O11 -> N2 + CO2 + H2O + K2CO3", "48(KNO3) + 5(C12H22O11) -> 24(N2) + 36(CO2) + 55(H2O) + 24(K2CO3)");
    }
}
