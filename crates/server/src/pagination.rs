use serde::{Deserialize, Serialize};

const MAX_PER_PAGE: i64 = 100;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Clone, Copy)]
pub struct PageBounds {
    pub page: i64,
    pub per_page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl PageParams {
    /// 越界输入一律夹回合法范围：页码至少 1，每页 1..=100。
    /// 超出末尾的页自然得到空结果，不报错。
    pub fn bounds(&self, default_per_page: i64) -> PageBounds {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self
            .per_page
            .unwrap_or(default_per_page)
            .clamp(1, MAX_PER_PAGE);
        PageBounds {
            page,
            per_page,
            limit: per_page,
            // page 是调用方给的，乘法必须饱和而不是回绕
            offset: (page - 1).saturating_mul(per_page),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl<T> PageResponse<T> {
    pub fn new(page: storage::Page<T>, bounds: PageBounds) -> Self {
        Self {
            items: page.items,
            page: bounds.page,
            per_page: bounds.per_page,
            total: page.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, per_page: Option<i64>) -> PageParams {
        PageParams { page, per_page }
    }

    #[test]
    fn defaults_to_first_page() {
        let b = params(None, None).bounds(10);
        assert_eq!((b.page, b.per_page, b.offset), (1, 10, 0));
    }

    #[test]
    fn clamps_page_and_per_page() {
        let b = params(Some(0), Some(0)).bounds(10);
        assert_eq!((b.page, b.per_page), (1, 1));

        let b = params(Some(-5), Some(9999)).bounds(10);
        assert_eq!((b.page, b.per_page), (1, 100));
    }

    #[test]
    fn offset_follows_page() {
        let b = params(Some(3), Some(20)).bounds(10);
        assert_eq!((b.limit, b.offset), (20, 40));
    }

    #[test]
    fn absurd_page_number_saturates_to_an_empty_page() {
        // 回绕成负 OFFSET 会被 SQLite 当 0，等于悄悄返回第一页
        let b = params(Some(i64::MAX), Some(100)).bounds(10);
        assert_eq!(b.offset, i64::MAX);
        assert!(b.offset > 0);

        let b = params(Some(i64::MAX), Some(1)).bounds(10);
        assert_eq!(b.offset, i64::MAX - 1);
    }
}
