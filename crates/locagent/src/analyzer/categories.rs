//! Fixed keyword table for preference categories
//!
//! Matching is plain substring membership against lower-cased review text.

/// Preference category a review can be attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    NatureOutdoors,
    CultureHistory,
    FoodDining,
    Shopping,
    Entertainment,
    SportsHealth,
    UrbanFacilities,
    Lodging,
}

impl Category {
    /// Every category, in table order
    pub const ALL: [Category; 8] = [
        Category::NatureOutdoors,
        Category::CultureHistory,
        Category::FoodDining,
        Category::Shopping,
        Category::Entertainment,
        Category::SportsHealth,
        Category::UrbanFacilities,
        Category::Lodging,
    ];

    /// Display name used in prompts
    pub fn label(&self) -> &'static str {
        match self {
            Category::NatureOutdoors => "自然与户外",
            Category::CultureHistory => "文化与历史",
            Category::FoodDining => "餐饮美食",
            Category::Shopping => "购物消费",
            Category::Entertainment => "休闲娱乐",
            Category::SportsHealth => "运动健康",
            Category::UrbanFacilities => "城市设施",
            Category::Lodging => "住宿场所",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::NatureOutdoors => &[
                "公园", "自然", "森林", "湖泊", "河流", "海滩", "山", "步道", "花园", "绿地",
                "绿化", "植物园", "露营", "观鸟", "钓鱼", "野餐", "登山", "徒步", "骑行",
                "观星", "日出", "日落", "海岸线", "瀑布", "峡谷",
            ],
            Category::CultureHistory => &[
                "博物馆", "历史", "遗址", "纪念碑", "寺庙", "教堂", "古街", "古镇", "美术馆",
                "画廊", "剧院", "音乐厅", "文化", "故居", "古城墙", "考古", "传统工艺",
                "民俗村", "文化街区", "艺术",
            ],
            Category::FoodDining => &[
                "餐厅", "美食", "咖啡", "小吃", "夜市", "酒吧", "茶馆", "甜品", "大排档",
                "火锅", "烧烤", "网红店", "老字号", "米其林", "特色菜", "美食城", "料理店",
            ],
            Category::Shopping => &[
                "商场", "购物", "百货", "商业街", "免税店", "市场", "集市", "手工艺", "特产",
                "古董", "超市", "便利店", "品牌店", "精品店", "商店",
            ],
            // "KTV" is upper-case and so can never match lower-cased text;
            // kept to mirror the published table.
            Category::Entertainment => &[
                "电影院", "KTV", "游乐场", "电玩城", "桌游", "网吧", "水疗", "按摩", "温泉",
                "桑拿", "足浴", "美容", "棋牌室", "酒吧街", "主题公园", "乐园",
            ],
            Category::SportsHealth => &[
                "体育馆", "健身", "游泳池", "球场", "滑雪场", "高尔夫", "攀岩", "瑜伽馆",
                "跑道", "自行车", "滑冰场", "潜水", "冲浪", "马术", "运动公园",
            ],
            Category::UrbanFacilities => &[
                "机场", "车站", "地铁", "公交", "码头", "停车场", "政府", "邮局", "银行",
                "派出所", "消防局", "医院", "诊所", "药房", "学校", "幼儿园", "图书馆",
                "科技馆", "天文馆", "游客中心", "厕所", "广场",
            ],
            Category::Lodging => &[
                "酒店", "民宿", "旅馆", "青旅", "度假村", "别墅", "公寓", "客栈", "露营地",
                "房车营地", "海景房",
            ],
        }
    }

    /// Whether any keyword occurs in `lowered` (already lower-cased text)
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords().iter().any(|k| lowered.contains(k))
    }

    /// Categories matched by a piece of text, in table order
    pub fn classify(text: &str) -> impl Iterator<Item = Category> {
        let lowered = text.to_lowercase();
        Self::ALL.into_iter().filter(move |c| c.matches(&lowered))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
