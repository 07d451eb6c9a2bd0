/*!
 * Responsibility
 * - 認証済みリクエストのコンテキスト（CurrentUser）を handler に提供する
 */

mod current_user;
