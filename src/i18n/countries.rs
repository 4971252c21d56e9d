//! ISO 3166-1 country names
//!
//! Alpha-2 code, English name, Ukrainian name. Used for the brand country
//! select; the code is what the backend stores.

use crate::table::SelectOption;

const COUNTRIES: &[(&str, &str, &str)] = &[
    ("AD", "Andorra", "Андорра"),
    ("AE", "United Arab Emirates", "Об'єднані Арабські Емірати"),
    ("AF", "Afghanistan", "Афганістан"),
    ("AG", "Antigua and Barbuda", "Антигуа і Барбуда"),
    ("AI", "Anguilla", "Ангілья"),
    ("AL", "Albania", "Албанія"),
    ("AM", "Armenia", "Вірменія"),
    ("AO", "Angola", "Ангола"),
    ("AQ", "Antarctica", "Антарктида"),
    ("AR", "Argentina", "Аргентина"),
    ("AS", "American Samoa", "Американське Самоа"),
    ("AT", "Austria", "Австрія"),
    ("AU", "Australia", "Австралія"),
    ("AW", "Aruba", "Аруба"),
    ("AX", "Åland Islands", "Аландські острови"),
    ("AZ", "Azerbaijan", "Азербайджан"),
    ("BA", "Bosnia and Herzegovina", "Боснія і Герцеговина"),
    ("BB", "Barbados", "Барбадос"),
    ("BD", "Bangladesh", "Бангладеш"),
    ("BE", "Belgium", "Бельгія"),
    ("BF", "Burkina Faso", "Буркіна-Фасо"),
    ("BG", "Bulgaria", "Болгарія"),
    ("BH", "Bahrain", "Бахрейн"),
    ("BI", "Burundi", "Бурунді"),
    ("BJ", "Benin", "Бенін"),
    ("BL", "Saint Barthélemy", "Сен-Бартелемі"),
    ("BM", "Bermuda", "Бермудські острови"),
    ("BN", "Brunei Darussalam", "Бруней"),
    ("BO", "Bolivia", "Болівія"),
    ("BQ", "Bonaire, Sint Eustatius and Saba", "Бонайре, Сінт-Естатіус і Саба"),
    ("BR", "Brazil", "Бразилія"),
    ("BS", "Bahamas", "Багамські Острови"),
    ("BT", "Bhutan", "Бутан"),
    ("BV", "Bouvet Island", "Острів Буве"),
    ("BW", "Botswana", "Ботсвана"),
    ("BY", "Belarus", "Білорусь"),
    ("BZ", "Belize", "Беліз"),
    ("CA", "Canada", "Канада"),
    ("CC", "Cocos (Keeling) Islands", "Кокосові (Кілінг) острови"),
    ("CD", "Congo, the Democratic Republic of the", "Демократична Республіка Конго"),
    ("CF", "Central African Republic", "Центральноафриканська Республіка"),
    ("CG", "Congo", "Конго"),
    ("CH", "Switzerland", "Швейцарія"),
    ("CI", "Côte d'Ivoire", "Кот-д'Івуар"),
    ("CK", "Cook Islands", "Острови Кука"),
    ("CL", "Chile", "Чилі"),
    ("CM", "Cameroon", "Камерун"),
    ("CN", "China", "Китай"),
    ("CO", "Colombia", "Колумбія"),
    ("CR", "Costa Rica", "Коста-Рика"),
    ("CU", "Cuba", "Куба"),
    ("CV", "Cabo Verde", "Кабо-Верде"),
    ("CW", "Curaçao", "Кюрасао"),
    ("CX", "Christmas Island", "Острів Різдва"),
    ("CY", "Cyprus", "Кіпр"),
    ("CZ", "Czechia", "Чехія"),
    ("DE", "Germany", "Німеччина"),
    ("DJ", "Djibouti", "Джибуті"),
    ("DK", "Denmark", "Данія"),
    ("DM", "Dominica", "Домініка"),
    ("DO", "Dominican Republic", "Домініканська Республіка"),
    ("DZ", "Algeria", "Алжир"),
    ("EC", "Ecuador", "Еквадор"),
    ("EE", "Estonia", "Естонія"),
    ("EG", "Egypt", "Єгипет"),
    ("EH", "Western Sahara", "Західна Сахара"),
    ("ER", "Eritrea", "Еритрея"),
    ("ES", "Spain", "Іспанія"),
    ("ET", "Ethiopia", "Ефіопія"),
    ("FI", "Finland", "Фінляндія"),
    ("FJ", "Fiji", "Фіджі"),
    ("FK", "Falkland Islands (Malvinas)", "Фолклендські (Мальвінські) острови"),
    ("FM", "Micronesia, Federated States of", "Мікронезія"),
    ("FO", "Faroe Islands", "Фарерські острови"),
    ("FR", "France", "Франція"),
    ("GA", "Gabon", "Габон"),
    ("GB", "United Kingdom", "Велика Британія"),
    ("GD", "Grenada", "Гренада"),
    ("GE", "Georgia", "Грузія"),
    ("GF", "French Guiana", "Французька Гвіана"),
    ("GG", "Guernsey", "Гернсі"),
    ("GH", "Ghana", "Гана"),
    ("GI", "Gibraltar", "Гібралтар"),
    ("GL", "Greenland", "Гренландія"),
    ("GM", "Gambia", "Гамбія"),
    ("GN", "Guinea", "Гвінея"),
    ("GP", "Guadeloupe", "Гваделупа"),
    ("GQ", "Equatorial Guinea", "Екваторіальна Гвінея"),
    ("GR", "Greece", "Греція"),
    (
        "GS",
        "South Georgia and the South Sandwich Islands",
        "Південна Джорджія та Південні Сандвічеві острови",
    ),
    ("GT", "Guatemala", "Гватемала"),
    ("GU", "Guam", "Гуам"),
    ("GW", "Guinea-Bissau", "Гвінея-Бісау"),
    ("GY", "Guyana", "Гаяна"),
    ("HK", "Hong Kong", "Гонконг"),
    ("HM", "Heard Island and McDonald Islands", "Острів Херд і острови Макдональд"),
    ("HN", "Honduras", "Гондурас"),
    ("HR", "Croatia", "Хорватія"),
    ("HT", "Haiti", "Гаїті"),
    ("HU", "Hungary", "Угорщина"),
    ("ID", "Indonesia", "Індонезія"),
    ("IE", "Ireland", "Ірландія"),
    ("IL", "Israel", "Ізраїль"),
    ("IM", "Isle of Man", "Острів Мен"),
    ("IN", "India", "Індія"),
    (
        "IO",
        "British Indian Ocean Territory",
        "Британська територія в Індійському океані",
    ),
    ("IQ", "Iraq", "Ірак"),
    ("IR", "Iran", "Іран"),
    ("IS", "Iceland", "Ісландія"),
    ("IT", "Italy", "Італія"),
    ("JE", "Jersey", "Джерсі"),
    ("JM", "Jamaica", "Ямайка"),
    ("JO", "Jordan", "Йорданія"),
    ("JP", "Japan", "Японія"),
    ("KE", "Kenya", "Кенія"),
    ("KG", "Kyrgyzstan", "Киргизстан"),
    ("KH", "Cambodia", "Камбоджа"),
    ("KI", "Kiribati", "Кірибаті"),
    ("KM", "Comoros", "Коморські Острови"),
    ("KN", "Saint Kitts and Nevis", "Сент-Кіттс і Невіс"),
    ("KP", "North Korea", "Північна Корея"),
    ("KR", "South Korea", "Південна Корея"),
    ("KW", "Kuwait", "Кувейт"),
    ("KY", "Cayman Islands", "Кайманові острови"),
    ("KZ", "Kazakhstan", "Казахстан"),
    ("LA", "Lao People's Democratic Republic", "Лаос"),
    ("LB", "Lebanon", "Ліван"),
    ("LC", "Saint Lucia", "Сент-Люсія"),
    ("LI", "Liechtenstein", "Ліхтенштейн"),
    ("LK", "Sri Lanka", "Шрі-Ланка"),
    ("LR", "Liberia", "Ліберія"),
    ("LS", "Lesotho", "Лесото"),
    ("LT", "Lithuania", "Литва"),
    ("LU", "Luxembourg", "Люксембург"),
    ("LV", "Latvia", "Латвія"),
    ("LY", "Libya", "Лівія"),
    ("MA", "Morocco", "Марокко"),
    ("MC", "Monaco", "Монако"),
    ("MD", "Moldova", "Молдова"),
    ("ME", "Montenegro", "Чорногорія"),
    ("MF", "Saint Martin (French part)", "Сен-Мартен"),
    ("MG", "Madagascar", "Мадагаскар"),
    ("MH", "Marshall Islands", "Маршаллові Острови"),
    ("MK", "North Macedonia", "Північна Македонія"),
    ("ML", "Mali", "Малі"),
    ("MM", "Myanmar", "М'янма"),
    ("MN", "Mongolia", "Монголія"),
    ("MO", "Macao", "Макао"),
    ("MP", "Northern Mariana Islands", "Північні Маріанські острови"),
    ("MQ", "Martinique", "Мартиніка"),
    ("MR", "Mauritania", "Мавританія"),
    ("MS", "Montserrat", "Монтсеррат"),
    ("MT", "Malta", "Мальта"),
    ("MU", "Mauritius", "Маврикій"),
    ("MV", "Maldives", "Мальдіви"),
    ("MW", "Malawi", "Малаві"),
    ("MX", "Mexico", "Мексика"),
    ("MY", "Malaysia", "Малайзія"),
    ("MZ", "Mozambique", "Мозамбік"),
    ("NA", "Namibia", "Намібія"),
    ("NC", "New Caledonia", "Нова Каледонія"),
    ("NE", "Niger", "Нігер"),
    ("NF", "Norfolk Island", "Острів Норфолк"),
    ("NG", "Nigeria", "Нігерія"),
    ("NI", "Nicaragua", "Нікарагуа"),
    ("NL", "Netherlands", "Нідерланди"),
    ("NO", "Norway", "Норвегія"),
    ("NP", "Nepal", "Непал"),
    ("NR", "Nauru", "Науру"),
    ("NU", "Niue", "Ніуе"),
    ("NZ", "New Zealand", "Нова Зеландія"),
    ("OM", "Oman", "Оман"),
    ("PA", "Panama", "Панама"),
    ("PE", "Peru", "Перу"),
    ("PF", "French Polynesia", "Французька Полінезія"),
    ("PG", "Papua New Guinea", "Папуа Нова Гвінея"),
    ("PH", "Philippines", "Філіппіни"),
    ("PK", "Pakistan", "Пакистан"),
    ("PL", "Poland", "Польща"),
    ("PM", "Saint Pierre and Miquelon", "Сен-П'єр і Мікелон"),
    ("PN", "Pitcairn", "Піткерн"),
    ("PR", "Puerto Rico", "Пуерто-Рико"),
    ("PS", "Palestine", "Палестина"),
    ("PT", "Portugal", "Португалія"),
    ("PW", "Palau", "Палау"),
    ("PY", "Paraguay", "Парагвай"),
    ("QA", "Qatar", "Катар"),
    ("RE", "Réunion", "Реюньйон"),
    ("RO", "Romania", "Румунія"),
    ("RS", "Serbia", "Сербія"),
    ("RU", "Russian Federation", "Росія"),
    ("RW", "Rwanda", "Руанда"),
    ("SA", "Saudi Arabia", "Саудівська Аравія"),
    ("SB", "Solomon Islands", "Соломонові Острови"),
    ("SC", "Seychelles", "Сейшельські Острови"),
    ("SD", "Sudan", "Судан"),
    ("SE", "Sweden", "Швеція"),
    ("SG", "Singapore", "Сінгапур"),
    (
        "SH",
        "Saint Helena, Ascension and Tristan da Cunha",
        "Острови Святої Єлени, Вознесіння і Тристан-да-Кунья",
    ),
    ("SI", "Slovenia", "Словенія"),
    ("SJ", "Svalbard and Jan Mayen", "Шпіцберген і Ян-Маєн"),
    ("SK", "Slovakia", "Словаччина"),
    ("SL", "Sierra Leone", "Сьєрра-Леоне"),
    ("SM", "San Marino", "Сан-Марино"),
    ("SN", "Senegal", "Сенегал"),
    ("SO", "Somalia", "Сомалі"),
    ("SR", "Suriname", "Суринам"),
    ("SS", "South Sudan", "Південний Судан"),
    ("ST", "Sao Tome and Principe", "Сан-Томе і Принсіпі"),
    ("SV", "El Salvador", "Сальвадор"),
    ("SX", "Sint Maarten (Dutch part)", "Сінт-Мартен"),
    ("SY", "Syrian Arab Republic", "Сирія"),
    ("SZ", "Eswatini", "Есватіні"),
    ("TC", "Turks and Caicos Islands", "Острови Теркс і Кайкос"),
    ("TD", "Chad", "Чад"),
    (
        "TF",
        "French Southern Territories",
        "Французькі Південні і Антарктичні території",
    ),
    ("TG", "Togo", "Того"),
    ("TH", "Thailand", "Таїланд"),
    ("TJ", "Tajikistan", "Таджикистан"),
    ("TK", "Tokelau", "Токелау"),
    ("TL", "Timor-Leste", "Тимор-Лешті"),
    ("TM", "Turkmenistan", "Туркменістан"),
    ("TN", "Tunisia", "Туніс"),
    ("TO", "Tonga", "Тонга"),
    ("TR", "Türkiye", "Туреччина"),
    ("TT", "Trinidad and Tobago", "Тринідад і Тобаго"),
    ("TV", "Tuvalu", "Тувалу"),
    ("TW", "Taiwan", "Тайвань"),
    ("TZ", "Tanzania", "Танзанія"),
    ("UA", "Ukraine", "Україна"),
    ("UG", "Uganda", "Уганда"),
    ("UM", "United States Minor Outlying Islands", "Зовнішні малі острови США"),
    ("US", "United States of America", "Сполучені Штати Америки"),
    ("UY", "Uruguay", "Уругвай"),
    ("UZ", "Uzbekistan", "Узбекистан"),
    ("VA", "Holy See", "Ватикан"),
    ("VC", "Saint Vincent and the Grenadines", "Сент-Вінсент і Гренадини"),
    ("VE", "Venezuela", "Венесуела"),
    ("VG", "Virgin Islands, British", "Британські Віргінські острови"),
    ("VI", "Virgin Islands, U.S.", "Віргінські острови (США)"),
    ("VN", "Vietnam", "В'єтнам"),
    ("VU", "Vanuatu", "Вануату"),
    ("WF", "Wallis and Futuna", "Волліс і Футуна"),
    ("WS", "Samoa", "Самоа"),
    ("XK", "Kosovo", "Косово"),
    ("YE", "Yemen", "Ємен"),
    ("YT", "Mayotte", "Майотта"),
    ("ZA", "South Africa", "Південно-Африканська Республіка"),
    ("ZM", "Zambia", "Замбія"),
    ("ZW", "Zimbabwe", "Зімбабве"),
];

/// Country name in `locale`; English unless the locale is Ukrainian
pub fn name(code: &str, locale: &str) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .find(|(c, _, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, en, uk)| if is_ukrainian(locale) { *uk } else { *en })
}

/// Every country as a select option, sorted by its name in `locale`
pub fn options(locale: &str) -> Vec<SelectOption> {
    let uk = is_ukrainian(locale);
    let mut options: Vec<SelectOption> = COUNTRIES
        .iter()
        .map(|(code, en, ukr)| SelectOption::new(*code, if uk { *ukr } else { *en }))
        .collect();
    SelectOption::sort_by_text(&mut options);
    options
}

fn is_ukrainian(locale: &str) -> bool {
    locale == "uk" || locale.starts_with("uk-") || locale.starts_with("uk_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique_alpha2() {
        let mut seen = HashSet::new();
        for (code, en, uk) in COUNTRIES {
            assert_eq!(code.len(), 2, "{code}");
            assert!(code.chars().all(|c| c.is_ascii_uppercase()), "{code}");
            assert!(!en.is_empty() && !uk.is_empty(), "{code}");
            assert!(seen.insert(*code), "duplicate {code}");
        }
        assert_eq!(COUNTRIES.len(), 250);
    }

    #[test]
    fn names_follow_locale() {
        assert_eq!(name("CA", "en"), Some("Canada"));
        assert_eq!(name("ca", "uk"), Some("Канада"));
        assert_eq!(name("DE", "uk-UA"), Some("Німеччина"));
        assert_eq!(name("ZZ", "en"), None);
    }

    #[test]
    fn options_sort_by_localized_name() {
        let en = options("en");
        assert_eq!(en.len(), COUNTRIES.len());
        assert_eq!(en[0].text, "Afghanistan");
        // Å sorts with A
        assert_eq!(en[1].value, "AX");

        let uk = options("uk");
        let position = |code: &str| uk.iter().position(|o| o.value == code).unwrap();
        assert_eq!(uk[0].text, "Австралія");
        // Є, І and Ї sit inside the alphabet, not after Я
        assert!(position("ET") < position("EG"));
        assert!(position("EG") < position("ZM"));
        assert!(position("ZM") < position("IL"));
        assert!(position("IL") < position("JO"));
        assert!(position("JO") < position("KE"));
        assert_eq!(uk.last().map(|o| o.value.as_str()), Some("JP"));
    }
}
