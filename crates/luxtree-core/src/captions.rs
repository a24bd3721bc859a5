/// A line of verse and who wrote it, shown when a particle is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caption {
    pub text: &'static str,
    pub author: &'static str,
}

const fn caption(text: &'static str, author: &'static str) -> Caption {
    Caption { text, author }
}

/// Fixed, ordered caption list. Particle `i` carries `CAPTIONS[i % CAPTIONS.len()]`.
pub const CAPTIONS: &[Caption] = &[
    caption("火树银花合，星桥铁锁开", "苏味道"),
    caption("东风夜放花千树", "辛弃疾"),
    caption("宝马雕车香满路", "辛弃疾"),
    caption("明月几时有，把酒问青天", "苏轼"),
    caption("今月曾经照古人", "李白"),
    caption("愿我如星君如月", "范成大"),
    caption("夜夜流光相皎洁", "范成大"),
    caption("众里寻他千百度", "辛弃疾"),
    caption("蓦然回首，那人却在灯火阑珊处", "辛弃疾"),
    caption("面朝大海，春暖花开", "海子"),
    caption("黑夜给了我黑色的眼睛", "顾城"),
    caption("你站在桥上看风景", "卞之琳"),
    caption("看风景的人在楼上看你", "卞之琳"),
    caption("生如夏花之绚烂", "泰戈尔"),
    caption("死如秋叶之静美", "泰戈尔"),
];

#[inline]
pub fn caption_for_index(index: usize) -> Caption {
    CAPTIONS[index % CAPTIONS.len()]
}
