//! JMA weather code (`weatherCodes`) lookup.
//!
//! Codes are grouped by hundreds: 1xx clear, 2xx cloudy, 3xx rain, 4xx snow.

/// Description and icon for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherInfo {
    pub description: &'static str,
    pub emoji: &'static str,
}

/// Look up a JMA weather code. `None` for codes outside the table.
pub fn lookup(code: &str) -> Option<WeatherInfo> {
    let (description, emoji) = match code {
        "100" => ("晴れ", "☀️"),
        "101" => ("晴れ時々曇り", "🌤️"),
        "102" => ("晴れ一時雨", "🌦️"),
        "103" => ("晴れ時々雨", "🌦️"),
        "104" => ("晴れ一時雪", "🌤️"),
        "105" => ("晴れ時々雪", "🌤️"),
        "106" => ("晴れ一時雨後晴れ", "🌦️"),
        "107" => ("晴れ時々雨後晴れ", "🌦️"),
        "108" => ("晴れ一時雨後雪", "🌦️"),
        "110" => ("晴れ後時々曇り", "🌤️"),
        "111" => ("晴れ後曇り", "☀️→☁️"),
        "112" => ("晴れ後一時雨", "🌦️"),
        "113" => ("晴れ後時々雨", "🌦️"),
        "114" => ("晴れ後雨", "☀️→☂️"),
        "115" => ("晴れ後一時雪", "🌤️"),
        "116" => ("晴れ後時々雪", "🌤️"),
        "117" => ("晴れ後雪", "☀️→☃️"),
        "118" => ("晴れ後雨後晴れ", "🌦️"),
        "119" => ("晴れ後雨後雪", "🌦️"),
        "120" => ("晴れ朝夕一時雨", "🌦️"),
        "121" => ("晴れ朝のうち一時雨", "🌦️"),
        "122" => ("晴れ夕方一時雨", "🌦️"),
        "123" => ("晴れ山沿い雷雨", "⛈️"),
        "124" => ("晴れ山沿い雪", "🌤️"),
        "125" => ("晴れ午後は雷雨", "⛈️"),
        "126" => ("晴れ昼頃から雨", "🌦️"),
        "127" => ("晴れ夕方から雨", "🌦️"),
        "128" => ("晴れ夜は雨", "🌦️"),
        "129" => ("晴れ夜半から雨", "🌦️"),
        "130" => ("朝の内霧後晴れ", "🌫️"),
        "131" => ("晴れ明け方霧", "🌫️"),
        "132" => ("晴れ朝夕曇り", "🌤️"),
        "140" => ("晴れ時々雨で雷を伴う", "⛈️"),
        "160" => ("晴れ一時雪か雨", "🌨️"),
        "170" => ("晴れ時々雪か雨", "🌨️"),
        "181" => ("晴れ後雪か雨", "🌨️"),
        "200" => ("曇り", "☁️"),
        "201" => ("曇り時々晴れ", "⛅"),
        "202" => ("曇り一時雨", "🌧️"),
        "203" => ("曇り時々雨", "🌧️"),
        "204" => ("曇り一時雪", "🌨️"),
        "205" => ("曇り時々雪", "🌨️"),
        "206" => ("曇り一時雨後晴れ", "🌦️"),
        "207" => ("曇り時々雨後晴れ", "🌦️"),
        "208" => ("曇り一時雨後雪", "🌧️"),
        "209" => ("霧", "🌫️"),
        "210" => ("曇り後時々晴れ", "⛅"),
        "211" => ("曇り後晴れ", "☁️→☀️"),
        "212" => ("曇り後一時雨", "🌧️"),
        "213" => ("曇り後時々雨", "🌧️"),
        "214" => ("曇り後雨", "☁️→☂️"),
        "215" => ("曇り後一時雪", "🌨️"),
        "216" => ("曇り後時々雪", "🌨️"),
        "217" => ("曇り後雪", "☁️→☃️"),
        "218" => ("曇り後雨後晴れ", "🌦️"),
        "219" => ("曇り後雨後雪", "🌧️"),
        "220" => ("曇り朝夕一時雨", "🌧️"),
        "221" => ("曇り朝のうち一時雨", "🌧️"),
        "222" => ("曇り夕方一時雨", "🌧️"),
        "223" => ("曇り日中時々晴れ", "⛅"),
        "224" => ("曇り昼頃から雨", "🌧️"),
        "225" => ("曇り夕方から雨", "🌧️"),
        "226" => ("曇り夜は雨", "🌧️"),
        "227" => ("曇り夜半から雨", "🌧️"),
        "228" => ("曇り昼頃から雪", "🌨️"),
        "229" => ("曇り夕方から雪", "🌨️"),
        "230" => ("曇り夜は雪", "🌨️"),
        "231" => ("曇り海上海岸は霧か霧雨", "🌫️"),
        "240" => ("曇り時々雨で雷を伴う", "⛈️"),
        "250" => ("曇り時々雪で雷を伴う", "⛈️"),
        "260" => ("曇り一時雪か雨", "🌨️"),
        "270" => ("曇り時々雪か雨", "🌨️"),
        "281" => ("曇り後雪か雨", "🌨️"),
        "300" => ("雨", "☂️"),
        "301" => ("雨時々晴れ", "🌦️"),
        "302" => ("雨時々止む", "☂️"),
        "303" => ("雨時々雪", "🌧️"),
        "304" => ("雨雪", "☂️"),
        "306" => ("大雨", "☔️"),
        "307" => ("風雨共に強い", "☂️"),
        "308" => ("雨で暴風を伴う", "☂️🌪️"),
        "309" => ("雨一時雪", "🌧️"),
        "311" => ("雨後晴れ", "☂️→☀️"),
        "313" => ("雨後曇り", "☂️→☁️"),
        "314" => ("雨後時々雪", "🌧️"),
        "315" => ("雨後雪", "☂️→☃️"),
        "316" => ("雨雪後晴れ", "🌦️"),
        "317" => ("雨雪後曇り", "🌧️"),
        "320" => ("朝のうち雨後晴れ", "🌦️"),
        "321" => ("朝のうち雨後曇り", "🌧️"),
        "322" => ("雨朝晩一時雪", "🌧️"),
        "323" => ("雨昼頃から晴れ", "🌦️"),
        "324" => ("雨夕方から晴れ", "🌦️"),
        "325" => ("雨夜は晴れ", "🌦️"),
        "326" => ("雨夕方から雪", "🌨️"),
        "327" => ("雨夜は雪", "🌨️"),
        "328" => ("雨一時強く降る", "☂️"),
        "329" => ("雨一時みぞれ", "☂️"),
        "340" => ("雪か雨", "🌨️"),
        "350" => ("雨で雷を伴う", "⛈️"),
        "361" => ("雪か雨後晴れ", "🌨️"),
        "371" => ("雪か雨後曇り", "🌨️"),
        "400" => ("雪", "☃️"),
        "401" => ("雪時々晴れ", "🌨️"),
        "402" => ("雪時々止む", "☃️"),
        "403" => ("雪時々雨", "🌨️"),
        "405" => ("大雪", "☃️"),
        "406" => ("風雪強い", "🌨️"),
        "407" => ("暴風雪", "🌨️"),
        "409" => ("雪一時雨", "🌨️"),
        "411" => ("雪後晴れ", "☃️→☀️"),
        "413" => ("雪後曇り", "☃️→☁️"),
        "414" => ("雪後雨", "☃️→☂️"),
        "420" => ("朝のうち雪後晴れ", "🌨️"),
        "421" => ("朝のうち雪後曇り", "🌨️"),
        "422" => ("雪昼頃から雨", "🌨️"),
        "423" => ("雪夕方から雨", "🌨️"),
        "424" => ("雪夜半から雨", "🌨️"),
        "425" => ("雪一時強く降る", "☃️"),
        "426" => ("雪後みぞれ", "🌨️"),
        "427" => ("雪一時みぞれ", "🌨️"),
        "450" => ("雪で雷を伴う", "☃️⚡"),
        _ => return None,
    };
    Some(WeatherInfo { description, emoji })
}

/// Description for a code; unknown codes degrade to a placeholder that
/// carries the code itself.
pub fn describe(code: &str) -> String {
    lookup(code)
        .map(|info| info.description.to_string())
        .unwrap_or_else(|| format!("不明な天気コード: {}", code))
}

/// Icon for a code, empty for unknown codes.
pub fn emoji(code: &str) -> &'static str {
    lookup(code).map(|info| info.emoji).unwrap_or("")
}
