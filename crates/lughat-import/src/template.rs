/// Canonical example of the accepted import format
pub const DICTIONARY_TEMPLATE: &str = "word,meaning,pronunciation,region,example,dialects
Salam,Hello/Peace,sa-laam,Punjab,Used as a common greeting,\"Multani: salamat, Lahori: salaam\"
Mehrbani,Kindness,mehr-ba-nee,Sindh,Show mehrbani to others,\"Sindhi: mehrbano\"
Adab,Respect,aa-dab,Federal,A formal greeting,\"\"
";

pub const TEMPLATE_FILE_NAME: &str = "dictionary_template.csv";
