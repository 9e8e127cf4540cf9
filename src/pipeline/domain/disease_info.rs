use indexmap::IndexMap;
use serde::Serialize;

pub const NO_VIETNAMESE_NAME: &str = "Không có thông tin";
pub const UNKNOWN_CAUSE: &str = "Chưa rõ";
pub const NO_SIGNS: &str = "Không có";
pub const UNKNOWN_TREATMENT: &str = "Chưa rõ";

/// Educational text shown next to a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseInfo {
    pub english_name: String,
    pub vietnamese_name: String,
    pub cause: String,
    pub signs: String,
    pub treatment: String,
}

impl DiseaseInfo {
    fn new(
        english_name: &str,
        vietnamese_name: &str,
        cause: &str,
        signs: &str,
        treatment: &str,
    ) -> Self {
        Self {
            english_name: english_name.to_string(),
            vietnamese_name: vietnamese_name.to_string(),
            cause: cause.to_string(),
            signs: signs.to_string(),
            treatment: treatment.to_string(),
        }
    }

    /// Record used when a class code has no catalog entry. The English name
    /// degrades to the upper-cased class code.
    pub fn placeholder(code: &str) -> Self {
        Self::new(
            &code.to_uppercase(),
            NO_VIETNAMESE_NAME,
            UNKNOWN_CAUSE,
            NO_SIGNS,
            UNKNOWN_TREATMENT,
        )
    }
}

/// Static table of [`DiseaseInfo`] keyed by class code.
#[derive(Debug, Clone)]
pub struct DiseaseCatalog {
    entries: IndexMap<String, DiseaseInfo>,
}

impl DiseaseCatalog {
    pub fn new(entries: IndexMap<String, DiseaseInfo>) -> Self {
        Self { entries }
    }

    /// The seven HAM10000 lesion classes the bundled model was trained on.
    pub fn builtin() -> Self {
        let entries = [
            (
                "akiec",
                DiseaseInfo::new(
                    "Actinic Keratoses",
                    "Dày sừng quang hóa",
                    "Tiếp xúc lâu dài với tia cực tím (UV).",
                    "Vùng da thô ráp, có vảy, sạm màu.",
                    "Điều trị bằng laser, lạnh, kem bôi, hoặc phẫu thuật nhỏ.",
                ),
            ),
            (
                "bcc",
                DiseaseInfo::new(
                    "Basal Cell Carcinoma",
                    "Ung thư biểu mô tế bào đáy",
                    "Tia UV từ ánh nắng mặt trời.",
                    "Nốt sáp bóng, dễ chảy máu.",
                    "Phẫu thuật, xạ trị, hoặc điều trị tại chỗ.",
                ),
            ),
            (
                "bkl",
                DiseaseInfo::new(
                    "Benign Keratosis-like lesions",
                    "Tổn thương lành tính giống dày sừng",
                    "Thay đổi da do lão hóa hoặc di truyền.",
                    "Vùng da sẫm màu, phẳng hoặc gồ nhẹ.",
                    "Không cần điều trị, có thể loại bỏ vì thẩm mỹ.",
                ),
            ),
            (
                "df",
                DiseaseInfo::new(
                    "Dermatofibroma",
                    "U xơ da",
                    "Phản ứng da sau tổn thương nhỏ như vết cắn.",
                    "U cứng, nhỏ, màu nâu hoặc đỏ tím.",
                    "Không cần điều trị. Có thể phẫu thuật nếu gây khó chịu.",
                ),
            ),
            (
                "mel",
                DiseaseInfo::new(
                    "Melanoma",
                    "U hắc tố ác tính",
                    "Tổn thương DNA tế bào hắc tố (thường do tia UV).",
                    "Nốt ruồi bất thường về màu, hình dạng, kích thước.",
                    "Phẫu thuật, điều trị miễn dịch, hóa trị. Phát hiện sớm rất quan trọng.",
                ),
            ),
            (
                "nv",
                DiseaseInfo::new(
                    "Melanocytic Nevi",
                    "Nốt ruồi sắc tố",
                    "Tăng sinh tế bào hắc tố lành tính.",
                    "Nốt tròn nhỏ, màu nâu hoặc đen, đối xứng.",
                    "Không cần điều trị. Theo dõi nếu có thay đổi bất thường.",
                ),
            ),
            (
                "vasc",
                DiseaseInfo::new(
                    "Vascular lesions",
                    "Tổn thương mạch máu",
                    "Bất thường mạch máu bẩm sinh hoặc mắc phải.",
                    "Bớt đỏ, u máu, da đổi màu.",
                    "Điều trị bằng laser hoặc theo dõi không can thiệp nếu lành tính.",
                ),
            ),
        ];

        Self::new(
            entries
                .into_iter()
                .map(|(code, info)| (code.to_string(), info))
                .collect(),
        )
    }

    pub fn get(&self, code: &str) -> Option<&DiseaseInfo> {
        self.entries.get(code)
    }

    /// Never fails: unknown codes get [`DiseaseInfo::placeholder`].
    pub fn describe(&self, code: &str) -> DiseaseInfo {
        self.get(code)
            .cloned()
            .unwrap_or_else(|| DiseaseInfo::placeholder(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DiseaseInfo)> {
        self.entries.iter().map(|(code, info)| (code.as_str(), info))
    }
}

impl Default for DiseaseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
